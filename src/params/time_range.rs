//! Time range resolution
//!
//! A request selects its window in one of two ways:
//!
//! ```text
//! time_type=relative  offset_units=minutes|seconds  offset_value=N   -> [now - N, now]
//! time_type=absolute  start_time=<epoch s>  end_time=<epoch s>       -> [start, end]
//! ```
//!
//! Validation short-circuits on the first problem found, in the order the
//! checks are listed in [`resolve_time_range`].

use super::error::{ParamError, ParamResult};
use super::{END_TIME, OFFSET_UNITS, OFFSET_VALUE, RequestParameters, START_TIME, TIME_TYPE};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Window width used when nothing is configured
pub const DEFAULT_MAX_TIME_DIFF_MINUTES: u32 = 60;

/// Hard ceiling for the configurable window width (two weeks)
pub const TIME_DIFF_CEILING_MINUTES: u32 = 20_160;

/// Largest relative offset accepted in seconds
pub const MAX_OFFSET_SECONDS: i64 = 3600;

/// A resolved, validated UTC window with `end >= start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Start as Unix seconds
    pub fn start_epoch(&self) -> i64 {
        self.start.timestamp()
    }

    /// End as Unix seconds
    pub fn end_epoch(&self) -> i64 {
        self.end.timestamp()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {}]", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OffsetUnits {
    Seconds,
    Minutes,
}

impl OffsetUnits {
    fn parse(s: &str) -> ParamResult<Self> {
        match s {
            "seconds" => Ok(OffsetUnits::Seconds),
            "minutes" => Ok(OffsetUnits::Minutes),
            _ => Err(ParamError::UnsupportedOffsetUnits),
        }
    }

    fn max_value(&self, max_diff_minutes: u32) -> i64 {
        match self {
            OffsetUnits::Seconds => MAX_OFFSET_SECONDS,
            OffsetUnits::Minutes => i64::from(max_diff_minutes),
        }
    }

    fn duration(&self, value: i64) -> Duration {
        match self {
            OffsetUnits::Seconds => Duration::seconds(value),
            OffsetUnits::Minutes => Duration::minutes(value),
        }
    }
}

/// Resolve the request's time window.
///
/// `max_diff_minutes` bounds both the relative offset (in minutes) and the width
/// of an absolute window.
pub fn resolve_time_range(
    params: &RequestParameters,
    max_diff_minutes: u32,
) -> ParamResult<TimeRange> {
    resolve_time_range_at(params, max_diff_minutes, Utc::now())
}

/// Same as [`resolve_time_range`] with an explicit "now" for the relative branch
pub fn resolve_time_range_at(
    params: &RequestParameters,
    max_diff_minutes: u32,
    now: DateTime<Utc>,
) -> ParamResult<TimeRange> {
    let time_type = params
        .get(TIME_TYPE)
        .ok_or(ParamError::MissingTimeRangeType)?;

    match time_type {
        "relative" => resolve_relative(params, max_diff_minutes, now),
        "absolute" => resolve_absolute(params, max_diff_minutes),
        _ => Err(ParamError::UnsupportedTimeRangeType),
    }
}

fn resolve_relative(
    params: &RequestParameters,
    max_diff_minutes: u32,
    now: DateTime<Utc>,
) -> ParamResult<TimeRange> {
    if params.is_present(START_TIME) {
        return Err(ParamError::StartTimeAppears);
    }
    if params.is_present(END_TIME) {
        return Err(ParamError::EndTimeAppears);
    }

    let units = params
        .get(OFFSET_UNITS)
        .ok_or(ParamError::MissingOffsetUnits)
        .and_then(OffsetUnits::parse)?;

    let value: i64 = params
        .get(OFFSET_VALUE)
        .ok_or(ParamError::MissingOffsetValue)?
        .parse()
        .map_err(|_| ParamError::UnsupportedOffsetValue)?;

    if value < 1 || value > units.max_value(max_diff_minutes) {
        return Err(ParamError::UnsupportedOffsetValue);
    }

    let end = now;
    let start = end - units.duration(value);
    Ok(TimeRange { start, end })
}

fn resolve_absolute(params: &RequestParameters, max_diff_minutes: u32) -> ParamResult<TimeRange> {
    let start = params
        .get(START_TIME)
        .ok_or(ParamError::MissingStartTime)
        .and_then(|s| parse_epoch(s).ok_or(ParamError::UnsupportedStartTime))?;

    let end = params
        .get(END_TIME)
        .ok_or(ParamError::MissingEndTime)
        .and_then(|s| parse_epoch(s).ok_or(ParamError::UnsupportedEndTime))?;

    // Ceiling first, then direction
    let diff = (end - start).num_seconds();
    if diff > i64::from(max_diff_minutes) * 60 {
        return Err(ParamError::TimeDifferenceTooBig);
    }
    if diff < 0 {
        return Err(ParamError::EndTimePreviousThanStartTime);
    }

    Ok(TimeRange { start, end })
}

/// Parse integer epoch seconds into a UTC instant
fn parse_epoch(s: &str) -> Option<DateTime<Utc>> {
    let secs: i64 = s.parse().ok()?;
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{PRODUCT_NUMBER, SERIAL_NUMBER};
    use chrono::TimeZone;

    const MAX: u32 = DEFAULT_MAX_TIME_DIFF_MINUTES;

    fn relative(units: &str, value: &str) -> RequestParameters {
        RequestParameters::new()
            .with(TIME_TYPE, "relative")
            .with(OFFSET_UNITS, units)
            .with(OFFSET_VALUE, value)
    }

    fn absolute(start: &str, end: &str) -> RequestParameters {
        RequestParameters::new()
            .with(TIME_TYPE, "absolute")
            .with(START_TIME, start)
            .with(END_TIME, end)
    }

    #[test]
    fn test_missing_time_type() {
        let empty = RequestParameters::new();
        assert_eq!(resolve_time_range(&empty, MAX), Err(ParamError::MissingTimeRangeType));

        let printer_only = RequestParameters::new()
            .with(PRODUCT_NUMBER, "L2E27A")
            .with(SERIAL_NUMBER, "SG59L1Q005");
        assert_eq!(
            resolve_time_range(&printer_only, MAX),
            Err(ParamError::MissingTimeRangeType)
        );

        let blank = absolute("1590751918", "1590755518").with(TIME_TYPE, "");
        assert_eq!(resolve_time_range(&blank, MAX), Err(ParamError::MissingTimeRangeType));
    }

    #[test]
    fn test_unsupported_time_type() {
        let params = absolute("1590751918", "1590755518").with(TIME_TYPE, "always");
        assert_eq!(
            resolve_time_range(&params, MAX),
            Err(ParamError::UnsupportedTimeRangeType)
        );
    }

    #[test]
    fn test_relative_rejects_explicit_times() {
        let params = relative("minutes", "5").with(START_TIME, "1590084529");
        assert_eq!(resolve_time_range(&params, MAX), Err(ParamError::StartTimeAppears));

        let params = relative("minutes", "5").with(END_TIME, "1590084529");
        assert_eq!(resolve_time_range(&params, MAX), Err(ParamError::EndTimeAppears));

        // Empty start_time counts as absent
        let params = relative("minutes", "5").with(START_TIME, "");
        assert!(resolve_time_range(&params, MAX).is_ok());
    }

    #[test]
    fn test_relative_offset_units() {
        let params = RequestParameters::new().with(TIME_TYPE, "relative");
        assert_eq!(resolve_time_range(&params, MAX), Err(ParamError::MissingOffsetUnits));

        let params = relative("days", "1");
        assert_eq!(
            resolve_time_range(&params, MAX),
            Err(ParamError::UnsupportedOffsetUnits)
        );
    }

    #[test]
    fn test_relative_offset_value() {
        let params = RequestParameters::new()
            .with(TIME_TYPE, "relative")
            .with(OFFSET_UNITS, "minutes");
        assert_eq!(resolve_time_range(&params, MAX), Err(ParamError::MissingOffsetValue));

        for bad in ["Golang", "1.5", "0", "-61", "61"] {
            assert_eq!(
                resolve_time_range(&relative("minutes", bad), MAX),
                Err(ParamError::UnsupportedOffsetValue),
                "minutes={}",
                bad
            );
        }

        for bad in ["0", "-1", "3601", "36001"] {
            assert_eq!(
                resolve_time_range(&relative("seconds", bad), MAX),
                Err(ParamError::UnsupportedOffsetValue),
                "seconds={}",
                bad
            );
        }
    }

    #[test]
    fn test_relative_boundaries_accepted() {
        let now = Utc.with_ymd_and_hms(2020, 5, 29, 12, 0, 0).unwrap();

        let range = resolve_time_range_at(&relative("minutes", "60"), MAX, now).unwrap();
        assert_eq!(range.end, now);
        assert_eq!(range.duration(), Duration::minutes(60));

        let range = resolve_time_range_at(&relative("seconds", "3600"), MAX, now).unwrap();
        assert_eq!(range.duration(), Duration::seconds(3600));

        let range = resolve_time_range_at(&relative("seconds", "1"), MAX, now).unwrap();
        assert_eq!(range.start, now - Duration::seconds(1));
    }

    #[test]
    fn test_relative_minutes_follow_configured_max() {
        let now = Utc::now();
        assert!(resolve_time_range_at(&relative("minutes", "120"), 120, now).is_ok());
        assert_eq!(
            resolve_time_range_at(&relative("minutes", "121"), 120, now),
            Err(ParamError::UnsupportedOffsetValue)
        );
        // Seconds keep their own ceiling regardless of the configured max
        assert_eq!(
            resolve_time_range_at(&relative("seconds", "3601"), 120, now),
            Err(ParamError::UnsupportedOffsetValue)
        );
    }

    #[test]
    fn test_relative_window_ends_now() {
        let before = Utc::now();
        let range = resolve_time_range(&relative("minutes", "5"), MAX).unwrap();
        let after = Utc::now();

        assert!(range.end >= before && range.end <= after);
        assert_eq!(range.end - range.start, Duration::minutes(5));
    }

    #[test]
    fn test_absolute_resolves_exact_instants() {
        let range = resolve_time_range(&absolute("1590751918", "1590755518"), MAX).unwrap();

        assert_eq!(range.start, Utc.with_ymd_and_hms(2020, 5, 29, 11, 31, 58).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2020, 5, 29, 12, 31, 58).unwrap());
        assert_eq!(range.start_epoch(), 1590751918);
        assert_eq!(range.end_epoch(), 1590755518);
    }

    #[test]
    fn test_absolute_missing_and_unparseable() {
        let params = RequestParameters::new()
            .with(TIME_TYPE, "absolute")
            .with(END_TIME, "1590755518");
        assert_eq!(resolve_time_range(&params, MAX), Err(ParamError::MissingStartTime));

        let params = absolute("yesterday", "1590755518");
        assert_eq!(resolve_time_range(&params, MAX), Err(ParamError::UnsupportedStartTime));

        let params = RequestParameters::new()
            .with(TIME_TYPE, "absolute")
            .with(START_TIME, "1590751918");
        assert_eq!(resolve_time_range(&params, MAX), Err(ParamError::MissingEndTime));

        let params = absolute("1590751918", "12:31");
        assert_eq!(resolve_time_range(&params, MAX), Err(ParamError::UnsupportedEndTime));

        // Start is validated before end
        let params = absolute("bad", "bad");
        assert_eq!(resolve_time_range(&params, MAX), Err(ParamError::UnsupportedStartTime));
    }

    #[test]
    fn test_absolute_difference_bounds() {
        let start = 1_590_751_918_i64;

        let at_max = absolute(&start.to_string(), &(start + 60 * 60).to_string());
        assert!(resolve_time_range(&at_max, MAX).is_ok());

        let one_minute_over = absolute(&start.to_string(), &(start + 61 * 60).to_string());
        assert_eq!(
            resolve_time_range(&one_minute_over, MAX),
            Err(ParamError::TimeDifferenceTooBig)
        );

        let one_second_over = absolute(&start.to_string(), &(start + 60 * 60 + 1).to_string());
        assert_eq!(
            resolve_time_range(&one_second_over, MAX),
            Err(ParamError::TimeDifferenceTooBig)
        );

        let reversed = absolute(&start.to_string(), &(start - 20 * 60).to_string());
        assert_eq!(
            resolve_time_range(&reversed, MAX),
            Err(ParamError::EndTimePreviousThanStartTime)
        );

        let empty_window = absolute(&start.to_string(), &start.to_string());
        let range = resolve_time_range(&empty_window, MAX).unwrap();
        assert_eq!(range.duration(), Duration::zero());
    }

    #[test]
    fn test_absolute_two_week_window() {
        let start = 1_590_000_000_i64;
        let end = start + i64::from(TIME_DIFF_CEILING_MINUTES) * 60;
        let params = absolute(&start.to_string(), &end.to_string());

        assert!(resolve_time_range(&params, TIME_DIFF_CEILING_MINUTES).is_ok());
        assert_eq!(
            resolve_time_range(&params, MAX),
            Err(ParamError::TimeDifferenceTooBig)
        );
    }
}
