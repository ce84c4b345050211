//! Query Compilation
//!
//! Turns a data kind and a printer filter into CloudWatch Logs Insights query text.
//!
//! - **Kinds**: descriptors holding the log group, topic discriminator and
//!   template triplet of each telemetry category
//! - **Compiler**: template selection and placeholder substitution
//!
//! # Example
//!
//! ```rust
//! use printer_timeline::params::PrinterFilter;
//! use printer_timeline::query::{compile_query, DataKind};
//!
//! let query = compile_query(DataKind::Heartbeat, &PrinterFilter::product("L2E27A"));
//! assert!(query.contains(r#"fields.ProductNumber="L2E27A""#));
//! ```

mod compiler;
mod kind;

pub use compiler::{compile_query, escape_literal, QueryCompiler};
pub use kind::{
    DataKind, KindDescriptor, TemplateTriplet, PRODUCT_NUMBER_PLACEHOLDER,
    SERIAL_NUMBER_PLACEHOLDER,
};
