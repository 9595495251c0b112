use crate::error::Error;
use crate::naming::VideoFileRecord;
use chrono::{Duration, NaiveDateTime};

/// Layout of the start token recovered from a file name.
pub const START_TOKEN_FORMAT: &str = "%Y%m%d_%H%M%S";

/// ISO-8601 basic with a `Z` suffix. The digits are the camera's local
/// clock; no timezone conversion happens before the suffix is applied.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Start and end of one clip, second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Start from the record's token, end after the buffered duration.
    pub fn derive(record: &VideoFileRecord, duration_secs: f64) -> Result<Self, Error> {
        let start = parse_start_token(&record.file_name, &record.start_token)?;
        let buffered = buffered_seconds(duration_secs).ok_or_else(|| Error::Probe {
            file: record.file_name.clone(),
            reason: format!("duration {} is not a non-negative number", duration_secs),
        })?;

        let end = Duration::try_seconds(buffered)
            .and_then(|delta| start.checked_add_signed(delta))
            .ok_or_else(|| Error::TimeParse {
                file: record.file_name.clone(),
                token: record.start_token.clone(),
                reason: format!("end time overflows after adding {}s", buffered),
            })?;

        Ok(Self { start, end })
    }

    pub fn start_string(&self) -> String {
        format_timestamp(&self.start)
    }

    pub fn end_string(&self) -> String {
        format_timestamp(&self.end)
    }
}

/// Whole seconds of the clip plus the one-second safety margin.
/// The fraction is truncated, never rounded: 0.999 gives 1, 59.95 gives 60.
pub fn buffered_seconds(duration_secs: f64) -> Option<i64> {
    if !duration_secs.is_finite() || duration_secs < 0.0 {
        return None;
    }
    let whole = duration_secs.floor();
    if whole >= i64::MAX as f64 {
        return None;
    }
    Some(whole as i64 + 1)
}

pub fn parse_start_token(file_name: &str, token: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(token, START_TOKEN_FORMAT).map_err(|err| Error::TimeParse {
        file: file_name.to_string(),
        token: token.to_string(),
        reason: err.to_string(),
    })
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(REPORT_TIMESTAMP_FORMAT).to_string()
}

/// Inverse of [`format_timestamp`].
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, REPORT_TIMESTAMP_FORMAT)
}
