//! Data kinds and their query templates
//!
//! Each telemetry category is described by a [`KindDescriptor`]: the log group
//! its events land in, the topic discriminator and the three template variants
//! selected by how much of the printer identity is known.

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the product number
pub const PRODUCT_NUMBER_PLACEHOLDER: &str = "{{productNumber}}";

/// Placeholder substituted with the serial number
pub const SERIAL_NUMBER_PLACEHOLDER: &str = "{{serialNumber}}";

/// Telemetry category served by the API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DataKind {
    /// Uploaded Open XML documents (every upload topic except heartbeats)
    OpenXml,
    /// JSON documents generated in the cloud by the parser
    CloudJson,
    /// Uploaded heartbeats
    Heartbeat,
    /// RTA reports after the cloud connector converted them to JSON
    Rta,
}

impl DataKind {
    /// Get all kinds for iteration
    pub fn all() -> &'static [DataKind] {
        &[
            DataKind::OpenXml,
            DataKind::CloudJson,
            DataKind::Heartbeat,
            DataKind::Rta,
        ]
    }

    /// Path segment used by the HTTP API
    pub fn slug(&self) -> &'static str {
        self.descriptor().slug
    }

    /// Parse a kind from its path segment
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.slug() == slug)
    }

    pub fn descriptor(&self) -> &'static KindDescriptor {
        match self {
            DataKind::OpenXml => &OPEN_XML,
            DataKind::CloudJson => &CLOUD_JSON,
            DataKind::Heartbeat => &HEARTBEAT,
            DataKind::Rta => &RTA,
        }
    }

    /// Log group queried when configuration does not override it
    pub fn default_log_group(&self) -> &'static str {
        self.descriptor().log_group
    }
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Three query bodies for one kind, picked by printer filter presence
#[derive(Debug)]
pub struct TemplateTriplet {
    /// Product and serial number both known
    pub device: &'static str,
    /// Only the product number known
    pub product: &'static str,
    /// No printer filter
    pub unfiltered: &'static str,
}

/// Static description of a data kind
#[derive(Debug)]
pub struct KindDescriptor {
    pub kind: DataKind,
    pub slug: &'static str,
    pub log_group: &'static str,
    /// Filter clause separating this kind from others in a shared log group
    pub discriminator: &'static str,
    pub templates: TemplateTriplet,
}

pub static OPEN_XML: KindDescriptor = KindDescriptor {
    kind: DataKind::OpenXml,
    slug: "open-xml",
    log_group: "/aws/lambda/AWSUpload",
    discriminator: r#"fields.topic != "heartbeat""#,
    templates: TemplateTriplet {
        device: r#"fields @timestamp, fields.ProductNumber, fields.SerialNumber, fields.bucket_name, fields.bucket_region, fields.key, fields.topic, fields.metadata.date
| filter ispresent(fields.ProductNumber) and ispresent(fields.SerialNumber) and ispresent(fields.bucket_name) and ispresent(fields.bucket_region) and ispresent(fields.key) and ispresent(fields.topic) and ispresent(fields.metadata.date) and fields.topic != "heartbeat" and fields.ProductNumber="{{productNumber}}" and fields.SerialNumber="{{serialNumber}}"
| sort @timestamp asc
| limit 10000"#,
        product: r#"fields @timestamp, fields.ProductNumber, fields.SerialNumber, fields.bucket_name, fields.bucket_region, fields.key, fields.topic, fields.metadata.date
| filter ispresent(fields.ProductNumber) and ispresent(fields.SerialNumber) and ispresent(fields.bucket_name) and ispresent(fields.bucket_region) and ispresent(fields.key) and ispresent(fields.topic) and ispresent(fields.metadata.date) and fields.topic != "heartbeat" and fields.ProductNumber="{{productNumber}}"
| sort @timestamp asc
| limit 10000"#,
        unfiltered: r#"fields @timestamp, fields.ProductNumber, fields.SerialNumber, fields.bucket_name, fields.bucket_region, fields.key, fields.topic, fields.metadata.date
| filter ispresent(fields.ProductNumber) and ispresent(fields.SerialNumber) and ispresent(fields.bucket_name) and ispresent(fields.bucket_region) and ispresent(fields.key) and ispresent(fields.topic) and ispresent(fields.metadata.date) and fields.topic != "heartbeat"
| sort @timestamp asc
| limit 10000"#,
    },
};

pub static CLOUD_JSON: KindDescriptor = KindDescriptor {
    kind: DataKind::CloudJson,
    slug: "cloud-json",
    log_group: "/aws/lambda/AWSParser",
    discriminator: r#"fields.topic = "json""#,
    templates: TemplateTriplet {
        device: r#"fields @timestamp, fields.ProductNumber, fields.SerialNumber, fields.bucket_name, fields.bucket_region, fields.key, fields.topic, fields.metadata.date, `fields.metadata.xml-generator-object-path`
| filter (ispresent(fields.ProductNumber) and ispresent(fields.SerialNumber) and ispresent(fields.bucket_name) and ispresent(fields.bucket_region) and ispresent(fields.key) and ispresent(fields.topic) and ispresent(fields.metadata.date) and ispresent(`fields.metadata.xml-generator-object-path`) and fields.topic = "json" and fields.ProductNumber="{{productNumber}}" and fields.SerialNumber="{{serialNumber}}")
| sort @timestamp asc
| limit 10000"#,
        product: r#"fields @timestamp, fields.ProductNumber, fields.SerialNumber, fields.bucket_name, fields.bucket_region, fields.key, fields.topic, fields.metadata.date, `fields.metadata.xml-generator-object-path`
| filter (ispresent(fields.ProductNumber) and ispresent(fields.SerialNumber) and ispresent(fields.bucket_name) and ispresent(fields.bucket_region) and ispresent(fields.key) and ispresent(fields.topic) and ispresent(fields.metadata.date) and ispresent(`fields.metadata.xml-generator-object-path`) and fields.topic = "json" and fields.ProductNumber="{{productNumber}}")
| sort @timestamp asc
| limit 10000"#,
        unfiltered: r#"fields @timestamp, fields.ProductNumber, fields.SerialNumber, fields.bucket_name, fields.bucket_region, fields.key, fields.topic, fields.metadata.date, `fields.metadata.xml-generator-object-path`
| filter (ispresent(fields.ProductNumber) and ispresent(fields.SerialNumber) and ispresent(fields.bucket_name) and ispresent(fields.bucket_region) and ispresent(fields.key) and ispresent(fields.topic) and ispresent(fields.metadata.date) and ispresent(`fields.metadata.xml-generator-object-path`) and fields.topic = "json")
| sort @timestamp asc
| limit 10000"#,
    },
};

pub static HEARTBEAT: KindDescriptor = KindDescriptor {
    kind: DataKind::Heartbeat,
    slug: "heartbeat",
    log_group: "/aws/lambda/AWSUpload",
    discriminator: r#"fields.topic = "heartbeat""#,
    templates: TemplateTriplet {
        device: r#"fields @timestamp, fields.ProductNumber, fields.SerialNumber, fields.bucket_name, fields.bucket_region, fields.key, fields.topic, fields.metadata.date
| filter ispresent(fields.ProductNumber) and ispresent(fields.SerialNumber) and ispresent(fields.bucket_name) and ispresent(fields.bucket_region) and ispresent(fields.key) and ispresent(fields.topic) and ispresent(fields.metadata.date) and fields.topic = "heartbeat" and fields.ProductNumber="{{productNumber}}" and fields.SerialNumber="{{serialNumber}}"
| sort @timestamp asc
| limit 10000"#,
        product: r#"fields @timestamp, fields.ProductNumber, fields.SerialNumber, fields.bucket_name, fields.bucket_region, fields.key, fields.topic, fields.metadata.date
| filter ispresent(fields.ProductNumber) and ispresent(fields.SerialNumber) and ispresent(fields.bucket_name) and ispresent(fields.bucket_region) and ispresent(fields.key) and ispresent(fields.topic) and ispresent(fields.metadata.date) and fields.topic = "heartbeat" and fields.ProductNumber="{{productNumber}}"
| sort @timestamp asc
| limit 10000"#,
        unfiltered: r#"fields @timestamp, fields.ProductNumber, fields.SerialNumber, fields.bucket_name, fields.bucket_region, fields.key, fields.topic, fields.metadata.date
| filter ispresent(fields.ProductNumber) and ispresent(fields.SerialNumber) and ispresent(fields.bucket_name) and ispresent(fields.bucket_region) and ispresent(fields.key) and ispresent(fields.topic) and ispresent(fields.metadata.date) and fields.topic = "heartbeat"
| sort @timestamp asc
| limit 10000"#,
    },
};

pub static RTA: KindDescriptor = KindDescriptor {
    kind: DataKind::Rta,
    slug: "rta",
    log_group: "/aws/lambda/AWSUploadRTA",
    discriminator: "ispresent(`fields.metadata.device-product-number`) and ispresent(`fields.metadata.device-serial-number`)",
    templates: TemplateTriplet {
        device: r#"fields @timestamp, `fields.metadata.device-product-number`, `fields.metadata.device-serial-number`, fields.bucket_name, fields.bucket_region, fields.key, fields.topic, `fields.metadata.xml-generator-object-path`
| filter ispresent(fields.bucket_name) and ispresent(fields.bucket_region) and ispresent(fields.key) and ispresent(fields.topic) and ispresent(`fields.metadata.xml-generator-object-path`) and ispresent(`fields.metadata.device-product-number`) and ispresent(`fields.metadata.device-serial-number`) and `fields.metadata.device-product-number`='{{productNumber}}' and `fields.metadata.device-serial-number`='{{serialNumber}}'
| sort @timestamp asc
| limit 10000"#,
        product: r#"fields @timestamp, `fields.metadata.device-product-number`, `fields.metadata.device-serial-number`, fields.bucket_name, fields.bucket_region, fields.key, fields.topic, `fields.metadata.xml-generator-object-path`
| filter ispresent(fields.bucket_name) and ispresent(fields.bucket_region) and ispresent(fields.key) and ispresent(fields.topic) and ispresent(`fields.metadata.xml-generator-object-path`) and ispresent(`fields.metadata.device-product-number`) and ispresent(`fields.metadata.device-serial-number`) and `fields.metadata.device-product-number`='{{productNumber}}'
| sort @timestamp asc
| limit 10000"#,
        unfiltered: r#"fields @timestamp, `fields.metadata.device-product-number`, `fields.metadata.device-serial-number`, fields.bucket_name, fields.bucket_region, fields.key, fields.topic, `fields.metadata.xml-generator-object-path`
| filter ispresent(fields.bucket_name) and ispresent(fields.bucket_region) and ispresent(fields.key) and ispresent(fields.topic) and ispresent(`fields.metadata.xml-generator-object-path`) and ispresent(`fields.metadata.device-product-number`) and ispresent(`fields.metadata.device-serial-number`)
| sort @timestamp asc
| limit 10000"#,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_roundtrip() {
        for kind in DataKind::all() {
            assert_eq!(DataKind::from_slug(kind.slug()), Some(*kind));
            assert_eq!(kind.descriptor().kind, *kind);
        }
        assert_eq!(DataKind::from_slug("object"), None);
        assert_eq!(DataKind::from_slug("Heartbeat"), None);
    }

    #[test]
    fn test_default_log_groups() {
        assert_eq!(DataKind::OpenXml.default_log_group(), "/aws/lambda/AWSUpload");
        assert_eq!(DataKind::CloudJson.default_log_group(), "/aws/lambda/AWSParser");
        assert_eq!(DataKind::Heartbeat.default_log_group(), "/aws/lambda/AWSUpload");
        assert_eq!(DataKind::Rta.default_log_group(), "/aws/lambda/AWSUploadRTA");
    }

    #[test]
    fn test_templates_share_shape() {
        for kind in DataKind::all() {
            let d = kind.descriptor();
            for template in [d.templates.device, d.templates.product, d.templates.unfiltered] {
                assert!(template.contains(d.discriminator), "{} discriminator", kind);
                assert!(template.contains("| sort @timestamp asc"), "{} ordering", kind);
                assert!(template.ends_with("| limit 10000"), "{} row cap", kind);
            }

            assert!(d.templates.device.contains(PRODUCT_NUMBER_PLACEHOLDER));
            assert!(d.templates.device.contains(SERIAL_NUMBER_PLACEHOLDER));
            assert!(d.templates.product.contains(PRODUCT_NUMBER_PLACEHOLDER));
            assert!(!d.templates.product.contains(SERIAL_NUMBER_PLACEHOLDER));
            assert!(!d.templates.unfiltered.contains("{{"));
        }
    }

    #[test]
    fn test_open_xml_and_heartbeat_are_disjoint() {
        assert!(OPEN_XML.templates.unfiltered.contains(r#"fields.topic != "heartbeat""#));
        assert!(HEARTBEAT.templates.unfiltered.contains(r#"fields.topic = "heartbeat""#));
        assert_eq!(OPEN_XML.log_group, HEARTBEAT.log_group);
    }
}
