//! Query template compiler
//!
//! Selects the template variant for a printer filter and substitutes the
//! filter values into its placeholders:
//!
//! ```text
//! pn + sn  -> device template
//! pn only  -> product template
//! neither  -> unfiltered template
//! ```
//!
//! Values are escaped for a Logs Insights string literal before substitution,
//! so a quote inside `pn` or `sn` cannot close the literal it is placed in.

use super::kind::{DataKind, PRODUCT_NUMBER_PLACEHOLDER, SERIAL_NUMBER_PLACEHOLDER};
use crate::params::PrinterFilter;

/// Compiles finished query text for a data kind
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryCompiler;

impl QueryCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Pick the template for `filter` without substituting anything
    pub fn select_template(&self, kind: DataKind, filter: &PrinterFilter) -> &'static str {
        let templates = &kind.descriptor().templates;

        // A lone serial number is rejected upstream, so it is never inspected alone here
        if filter.has_product_number() && filter.has_serial_number() {
            templates.device
        } else if filter.has_product_number() {
            templates.product
        } else {
            templates.unfiltered
        }
    }

    /// Produce ready-to-submit query text
    pub fn compile(&self, kind: DataKind, filter: &PrinterFilter) -> String {
        let template = self.select_template(kind, filter);
        substitute(template, filter)
    }
}

/// Convenience wrapper around [`QueryCompiler::compile`]
pub fn compile_query(kind: DataKind, filter: &PrinterFilter) -> String {
    QueryCompiler::new().compile(kind, filter)
}

/// Replace placeholders in one left-to-right pass over the template.
///
/// Substituted values are never rescanned, so placeholder text inside `pn` or
/// `sn` stays literal.
fn substitute(template: &str, filter: &PrinterFilter) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(pos) = rest.find("{{") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix(PRODUCT_NUMBER_PLACEHOLDER) {
            out.push_str(&escape_literal(&filter.product_number));
            rest = after;
        } else if let Some(after) = tail.strip_prefix(SERIAL_NUMBER_PLACEHOLDER) {
            out.push_str(&escape_literal(&filter.serial_number));
            rest = after;
        } else {
            out.push_str("{{");
            rest = &tail[2..];
        }
    }

    out.push_str(rest);
    out
}

/// Escape a value for use inside a single- or double-quoted Insights literal
pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '\'') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
