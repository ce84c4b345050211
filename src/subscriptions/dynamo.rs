//! DynamoDB subscription store

use super::{PrinterSubscription, SubscriptionError, SubscriptionStore};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;

/// [`SubscriptionStore`] backed by a DynamoDB table partitioned on `PrinterID`
#[derive(Clone)]
pub struct DynamoSubscriptionStore {
    client: Client,
    table_name: String,
}

impl DynamoSubscriptionStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig, table_name: impl Into<String>) -> Self {
        let store = Self::new(Client::new(sdk_config), table_name);
        tracing::info!(table = %store.table_name, "DynamoDB subscription table configured");
        store
    }
}

#[async_trait]
impl SubscriptionStore for DynamoSubscriptionStore {
    fn name(&self) -> &str {
        "dynamodb"
    }

    async fn printer_subscriptions(
        &self,
        printer_id: &str,
    ) -> Result<Vec<PrinterSubscription>, SubscriptionError> {
        let output = self
            .client
            .query()
            .table_name(self.table_name.as_str())
            .key_condition_expression("PrinterID = :printerId")
            .expression_attribute_values(":printerId", AttributeValue::S(printer_id.to_string()))
            .send()
            .await
            .map_err(|e| SubscriptionError::Query(DisplayErrorContext(e).to_string()))?;

        let items = output.items();
        if items.is_empty() {
            return Err(SubscriptionError::NotFound);
        }

        items.iter().map(subscription_from_item).collect()
    }
}

fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> String {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .unwrap_or_default()
}

/// Decode one table item
fn subscription_from_item(
    item: &HashMap<String, AttributeValue>,
) -> Result<PrinterSubscription, SubscriptionError> {
    let printer_id = string_attr(item, "PrinterID");
    if printer_id.is_empty() {
        return Err(SubscriptionError::Decode("item has no PrinterID".to_string()));
    }

    let registration_time_epoch = match item.get("RegistrationTimeEpoch") {
        None => 0,
        Some(value) => value
            .as_n()
            .ok()
            .and_then(|n| n.parse::<i64>().ok())
            .ok_or_else(|| {
                SubscriptionError::Decode(format!(
                    "RegistrationTimeEpoch of {} is not an integer",
                    printer_id
                ))
            })?,
    };

    Ok(PrinterSubscription {
        account_id: string_attr(item, "AccountID"),
        serial_number: string_attr(item, "SN"),
        product_number: string_attr(item, "PN"),
        service_id: string_attr(item, "ServiceID"),
        registration_time_epoch,
        printer_id,
    })
}
