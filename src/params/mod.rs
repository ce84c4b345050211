//! Request Parameter Validation
//!
//! Turns the raw string parameters of a telemetry request into validated values:
//!
//! - **Time range**: `time_type`, `start_time`, `end_time`, `offset_units`, `offset_value`
//!   resolved into a concrete UTC window ([`resolve_time_range`])
//! - **Printer filter**: `pn` / `sn` checked for co-presence ([`extract_printer_filter`])
//! - **Object location**: `bucket_region`, `bucket_name`, `object_key` for stored
//!   document retrieval ([`extract_object_location`])
//!
//! All steps are pure functions of the parameter map. The relative time branch
//! additionally reads the wall clock once.

mod error;
mod object;
mod printer;
mod time_range;

pub use error::{ParamError, ParamResult};
pub use object::{extract_object_location, BucketRegion, ObjectLocation};
pub use printer::{extract_printer_filter, PrinterFilter};
pub use time_range::{
    resolve_time_range, TimeRange, DEFAULT_MAX_TIME_DIFF_MINUTES, MAX_OFFSET_SECONDS,
    TIME_DIFF_CEILING_MINUTES,
};

use std::collections::HashMap;

pub const TIME_TYPE: &str = "time_type";
pub const START_TIME: &str = "start_time";
pub const END_TIME: &str = "end_time";
pub const OFFSET_UNITS: &str = "offset_units";
pub const OFFSET_VALUE: &str = "offset_value";
pub const PRODUCT_NUMBER: &str = "pn";
pub const SERIAL_NUMBER: &str = "sn";
pub const BUCKET_REGION: &str = "bucket_region";
pub const BUCKET_NAME: &str = "bucket_name";
pub const OBJECT_KEY: &str = "object_key";

/// Every key the service understands, in no particular order
pub const RECOGNIZED_KEYS: [&str; 10] = [
    TIME_TYPE,
    START_TIME,
    END_TIME,
    OFFSET_UNITS,
    OFFSET_VALUE,
    PRODUCT_NUMBER,
    SERIAL_NUMBER,
    BUCKET_REGION,
    BUCKET_NAME,
    OBJECT_KEY,
];

/// Flat string-to-string request parameters.
///
/// An absent key and a key mapped to `""` mean the same thing: not provided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters {
    values: HashMap<String, String>,
}

impl RequestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the recognized keys of an arbitrary map (e.g. a raw query string)
    pub fn from_query(raw: &HashMap<String, String>) -> Self {
        RECOGNIZED_KEYS
            .iter()
            .filter_map(|key| raw.get(*key).map(|v| (*key, v.as_str())))
            .collect()
    }

    /// Builder method: set a parameter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Value for `key`, or `None` when absent or empty
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Value for `key`, with absent mapped to `""`
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn is_present(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over the non-empty parameters
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RequestParameters::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
