//! In-memory subscription store for tests

use super::{PrinterSubscription, SubscriptionError, SubscriptionStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemorySubscriptionStore {
    subscriptions: HashMap<String, Vec<PrinterSubscription>>,
    failure: Option<String>,
    lookups: Mutex<Vec<String>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscription(mut self, subscription: PrinterSubscription) -> Self {
        self.subscriptions
            .entry(subscription.printer_id.clone())
            .or_default()
            .push(subscription);
        self
    }

    /// Make every lookup fail
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Printer ids looked up, in order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn printer_subscriptions(
        &self,
        printer_id: &str,
    ) -> Result<Vec<PrinterSubscription>, SubscriptionError> {
        self.lookups.lock().unwrap().push(printer_id.to_string());

        if let Some(message) = &self.failure {
            return Err(SubscriptionError::Query(message.clone()));
        }

        self.subscriptions
            .get(printer_id)
            .filter(|subs| !subs.is_empty())
            .cloned()
            .ok_or(SubscriptionError::NotFound)
    }
}
