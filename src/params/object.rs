//! Stored object location extraction

use super::error::{ParamError, ParamResult};
use super::{RequestParameters, BUCKET_NAME, BUCKET_REGION, OBJECT_KEY};
use serde::{Deserialize, Serialize};

/// Bucket regions documents are uploaded to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BucketRegion {
    #[serde(rename = "US_EAST_1")]
    UsEast1,
    #[serde(rename = "US_WEST_1")]
    UsWest1,
}

impl BucketRegion {
    /// Parse the `bucket_region` value as written in log events
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "US_EAST_1" => Some(BucketRegion::UsEast1),
            "US_WEST_1" => Some(BucketRegion::UsWest1),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketRegion::UsEast1 => "US_EAST_1",
            BucketRegion::UsWest1 => "US_WEST_1",
        }
    }
}

impl std::fmt::Display for BucketRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a stored document lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectLocation {
    pub region: BucketRegion,
    pub bucket_name: String,
    pub object_key: String,
}

/// Read `bucket_region` / `bucket_name` / `object_key` from the request.
///
/// Checked in that order; the first problem found is returned.
pub fn extract_object_location(params: &RequestParameters) -> ParamResult<ObjectLocation> {
    let region = params
        .get(BUCKET_REGION)
        .ok_or(ParamError::MissingBucketRegion)
        .and_then(|r| BucketRegion::parse(r).ok_or(ParamError::UnsupportedBucketRegion))?;

    let bucket_name = params
        .get(BUCKET_NAME)
        .ok_or(ParamError::MissingBucketName)?;

    let object_key = params.get(OBJECT_KEY).ok_or(ParamError::MissingObjectKey)?;

    Ok(ObjectLocation {
        region,
        bucket_name: bucket_name.to_string(),
        object_key: object_key.to_string(),
    })
}
