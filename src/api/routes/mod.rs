//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod storage;
pub mod subscriptions;
pub mod telemetry;
