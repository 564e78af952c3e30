use chrono::{Duration, NaiveTime};

pub const DEFAULT_START_TIME: &str = "09:00";
const TIME_FORMAT: &str = "%H:%M";

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).ok()
}

/// Returns the stored end time if there is one, otherwise `start + duration`.
///
/// The sum wraps at midnight: an activity starting at 23:00 for 120 minutes
/// ends at "01:00" with no indication that the day changed.
pub fn resolve_end_time(
    start_time: &str,
    duration_min: Option<u32>,
    stored_end_time: Option<&str>,
) -> Option<String> {
    if let Some(end) = stored_end_time {
        return Some(end.to_string());
    }

    let duration = duration_min?;
    let Some(start) = parse_time(start_time) else {
        log::warn!("Unparsable start time {:?}, leaving end time empty", start_time);
        return None;
    };

    // NaiveTime addition is modulo 24h.
    let end = start + Duration::minutes(i64::from(duration));
    Some(end.format(TIME_FORMAT).to_string())
}
