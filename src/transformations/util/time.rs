//! Enqueued-time normalization.

use chrono::{Duration, NaiveDateTime};

use crate::transformations::error::TransformError;

/// Offset applied to enqueued times. Brasília is treated as UTC-3 year round;
/// daylight saving and historical offset changes are out of scope.
const BRASILIA_OFFSET_HOURS: i64 = 3;

const UTC_SUFFIX: &str = " UTC";
const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const OUTPUT_FORMAT: &str = "%d/%m/%Y";

/// Convert a `"YYYY-MM-DD HH:MM:SS UTC"` string into the Brasília calendar
/// date as `DD/MM/YYYY`. The time of day is discarded after the shift.
///
/// A missing ` UTC` suffix or a non-matching date-time pattern is an error;
/// enqueued times are well-formed at the protocol level and are not recovered
/// per record.
pub fn enqueued_time_to_local_date(value: &str) -> Result<String, TransformError> {
    let stripped = value
        .strip_suffix(UTC_SUFFIX)
        .ok_or_else(|| TransformError::InvalidTimestamp {
            value: value.to_string(),
            reason: format!("missing '{}' suffix", UTC_SUFFIX.trim_start()),
        })?;

    let utc = NaiveDateTime::parse_from_str(stripped, INPUT_FORMAT).map_err(|e| {
        TransformError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;

    let local = utc - Duration::hours(BRASILIA_OFFSET_HOURS);
    Ok(local.format(OUTPUT_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_day_shift() {
        assert_eq!(
            enqueued_time_to_local_date("2021-09-05 08:04:08 UTC").unwrap(),
            "05/09/2021"
        );
    }

    #[test]
    fn test_shift_crosses_midnight() {
        assert_eq!(
            enqueued_time_to_local_date("2021-09-05 02:00:00 UTC").unwrap(),
            "04/09/2021"
        );
    }

    #[test]
    fn test_shift_crosses_year_boundary() {
        assert_eq!(
            enqueued_time_to_local_date("2022-01-01 01:30:00 UTC").unwrap(),
            "31/12/2021"
        );
    }

    #[test]
    fn test_missing_utc_suffix_is_an_error() {
        let err = enqueued_time_to_local_date("2021-09-05 08:04:08").unwrap_err();
        assert!(matches!(err, TransformError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_malformed_datetime_is_an_error() {
        let err = enqueued_time_to_local_date("05/09/2021 08:04 UTC").unwrap_err();
        assert!(matches!(err, TransformError::InvalidTimestamp { .. }));
    }
}
