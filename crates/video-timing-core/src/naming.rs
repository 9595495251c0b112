use crate::error::Error;

/// Segment that marks a clip with burned-in overlay data.
pub const OVERLAID_TOKEN: &str = "overlaid";

const DATE_DIGITS: usize = 8;
const TIME_DIGITS: usize = 6;

/// Fields recovered from one video file name.
///
/// Accepted layouts:
/// - `<trip>_<dive>_<YYYYMMDD>_<HHMMSS>.<ext>`
/// - `<trip>_<dive>_overlaid_<YYYYMMDD>_<HHMMSS>.<ext>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFileRecord {
    pub file_name: String,
    pub trip_id: String,
    pub dive_id: String,
    /// `YYYYMMDD_HHMMSS`, digits copied verbatim from the name.
    pub start_token: String,
    pub overlaid: bool,
}

pub fn parse_file_name(file_name: &str) -> Result<VideoFileRecord, Error> {
    let format_error = |reason: String| Error::Format {
        file: file_name.to_string(),
        reason,
    };

    let parts: Vec<&str> = file_name.split('_').collect();
    if parts.len() < 4 {
        return Err(format_error(format!(
            "expected at least 4 '_'-separated segments, found {}",
            parts.len()
        )));
    }

    let overlaid = parts[2] == OVERLAID_TOKEN;
    let (date_index, time_index) = if overlaid { (3, 4) } else { (2, 3) };

    let date = parts[date_index];
    let time_with_ext = parts.get(time_index).ok_or_else(|| {
        format_error(format!(
            "overlaid name needs a time segment after the date, found {} segments",
            parts.len()
        ))
    })?;
    let time = time_with_ext.split('.').next().unwrap_or_default();

    if !is_digits(date, DATE_DIGITS) {
        return Err(format_error(format!(
            "date segment '{}' is not {} digits",
            date, DATE_DIGITS
        )));
    }
    if !is_digits(time, TIME_DIGITS) {
        return Err(format_error(format!(
            "time segment '{}' is not {} digits",
            time, TIME_DIGITS
        )));
    }

    Ok(VideoFileRecord {
        file_name: file_name.to_string(),
        trip_id: parts[0].to_string(),
        dive_id: parts[1].to_string(),
        start_token: format!("{}_{}", date, time),
        overlaid,
    })
}

fn is_digits(segment: &str, len: usize) -> bool {
    segment.len() == len && segment.bytes().all(|b| b.is_ascii_digit())
}
