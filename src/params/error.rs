//! Parameter validation errors
//!
//! One variant per way a request's parameters can be malformed. All of them are
//! client errors and surface as HTTP 400.

use thiserror::Error;

/// Errors produced while validating request parameters
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    #[error("query string missing time range type error")]
    MissingTimeRangeType,

    #[error("query string unsupported time range type error")]
    UnsupportedTimeRangeType,

    #[error("query string start time should not appear error")]
    StartTimeAppears,

    #[error("query string end time should not appear error")]
    EndTimeAppears,

    #[error("query string missing offset units error")]
    MissingOffsetUnits,

    #[error("query string unsupported offset units error")]
    UnsupportedOffsetUnits,

    #[error("query string missing offset value error")]
    MissingOffsetValue,

    #[error("query string unsupported offset value error")]
    UnsupportedOffsetValue,

    #[error("query string missing start time error")]
    MissingStartTime,

    #[error("query string unsupported start time error")]
    UnsupportedStartTime,

    #[error("query string missing end time when time range is absolute error")]
    MissingEndTime,

    #[error("query string unsupported end time error")]
    UnsupportedEndTime,

    #[error("query string difference between start_time and end_time is too big error")]
    TimeDifferenceTooBig,

    #[error("query string end time is previous in time than start time error")]
    EndTimePreviousThanStartTime,

    #[error("query string Product Number missing but Serial Number present error")]
    ProductNumberMissingButSerialPresent,

    #[error("query string missing bucket region error")]
    MissingBucketRegion,

    #[error("query string unsupported bucket region error")]
    UnsupportedBucketRegion,

    #[error("query string missing bucket name error")]
    MissingBucketName,

    #[error("query string missing object key error")]
    MissingObjectKey,
}

impl ParamError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            ParamError::MissingTimeRangeType => "MISSING_TIME_RANGE_TYPE",
            ParamError::UnsupportedTimeRangeType => "UNSUPPORTED_TIME_RANGE_TYPE",
            ParamError::StartTimeAppears => "START_TIME_APPEARS",
            ParamError::EndTimeAppears => "END_TIME_APPEARS",
            ParamError::MissingOffsetUnits => "MISSING_OFFSET_UNITS",
            ParamError::UnsupportedOffsetUnits => "UNSUPPORTED_OFFSET_UNITS",
            ParamError::MissingOffsetValue => "MISSING_OFFSET_VALUE",
            ParamError::UnsupportedOffsetValue => "UNSUPPORTED_OFFSET_VALUE",
            ParamError::MissingStartTime => "MISSING_START_TIME",
            ParamError::UnsupportedStartTime => "UNSUPPORTED_START_TIME",
            ParamError::MissingEndTime => "MISSING_END_TIME",
            ParamError::UnsupportedEndTime => "UNSUPPORTED_END_TIME",
            ParamError::TimeDifferenceTooBig => "TIME_DIFFERENCE_TOO_BIG",
            ParamError::EndTimePreviousThanStartTime => "END_TIME_PREVIOUS_THAN_START_TIME",
            ParamError::ProductNumberMissingButSerialPresent => "PN_MISSING_SN_PRESENT",
            ParamError::MissingBucketRegion => "MISSING_BUCKET_REGION",
            ParamError::UnsupportedBucketRegion => "UNSUPPORTED_BUCKET_REGION",
            ParamError::MissingBucketName => "MISSING_BUCKET_NAME",
            ParamError::MissingObjectKey => "MISSING_OBJECT_KEY",
        }
    }
}

/// Result type for parameter validation
pub type ParamResult<T> = Result<T, ParamError>;
