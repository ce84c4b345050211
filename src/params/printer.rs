//! Printer filter extraction

use super::error::{ParamError, ParamResult};
use super::{PRODUCT_NUMBER, RequestParameters, SERIAL_NUMBER};
use serde::Serialize;

/// Optional printer identity used to narrow a query.
///
/// Empty fields mean "unfiltered". A serial number never appears without a
/// product number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrinterFilter {
    pub product_number: String,
    pub serial_number: String,
}

impl PrinterFilter {
    /// Filter on nothing
    pub fn unfiltered() -> Self {
        Self::default()
    }

    /// Filter on a product family
    pub fn product(product_number: impl Into<String>) -> Self {
        Self {
            product_number: product_number.into(),
            serial_number: String::new(),
        }
    }

    /// Filter on a single device
    pub fn device(product_number: impl Into<String>, serial_number: impl Into<String>) -> Self {
        Self {
            product_number: product_number.into(),
            serial_number: serial_number.into(),
        }
    }

    pub fn has_product_number(&self) -> bool {
        !self.product_number.is_empty()
    }

    pub fn has_serial_number(&self) -> bool {
        !self.serial_number.is_empty()
    }
}

/// Read `pn` / `sn` from the request.
///
/// Fails when a serial number is given without its product number.
pub fn extract_printer_filter(params: &RequestParameters) -> ParamResult<PrinterFilter> {
    let product_number = params.get_or_empty(PRODUCT_NUMBER);
    let serial_number = params.get_or_empty(SERIAL_NUMBER);

    if product_number.is_empty() && !serial_number.is_empty() {
        return Err(ParamError::ProductNumberMissingButSerialPresent);
    }

    Ok(PrinterFilter::device(product_number, serial_number))
}
