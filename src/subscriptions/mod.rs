//! Printer Subscriptions
//!
//! Looks up which cloud services a printer is registered with. Subscriptions are
//! keyed by printer id `"{pn}!{sn}"`.

mod dynamo;

#[cfg(test)]
pub(crate) mod testing;

pub use dynamo::DynamoSubscriptionStore;

use crate::params::PrinterFilter;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between product and serial number in a printer id
pub const PRINTER_ID_SEPARATOR: &str = "!";

/// Printer id used as the subscription partition key
pub fn printer_id(filter: &PrinterFilter) -> String {
    format!(
        "{}{}{}",
        filter.product_number, PRINTER_ID_SEPARATOR, filter.serial_number
    )
}

/// One printer/account registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterSubscription {
    #[serde(rename = "PrinterID")]
    pub printer_id: String,

    #[serde(rename = "AccountID", default, skip_serializing_if = "String::is_empty")]
    pub account_id: String,

    #[serde(rename = "SN", default, skip_serializing_if = "String::is_empty")]
    pub serial_number: String,

    #[serde(rename = "PN", default, skip_serializing_if = "String::is_empty")]
    pub product_number: String,

    /// Service the printer is registered with (e.g. "PRINTOS", "HP-PPU")
    #[serde(rename = "ServiceID", default, skip_serializing_if = "String::is_empty")]
    pub service_id: String,

    #[serde(rename = "RegistrationTimeEpoch", default, skip_serializing_if = "is_zero")]
    pub registration_time_epoch: i64,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

/// A table of printer subscriptions
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Human-readable name for logs
    fn name(&self) -> &str;

    /// All subscriptions of one printer; [`SubscriptionError::NotFound`] when there are none
    async fn printer_subscriptions(
        &self,
        printer_id: &str,
    ) -> Result<Vec<PrinterSubscription>, SubscriptionError>;
}

/// Errors reported by a subscription store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("element not found in database")]
    NotFound,

    #[error("failed to query subscriptions: {0}")]
    Query(String),

    #[error("failed to decode subscription: {0}")]
    Decode(String),
}
