use crate::types::EpochMillis;
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

const MILLIS_PER_MINUTE: i64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("Invalid date {0:?}, expected YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("Invalid time {0:?}, expected HH:MM or HH:MM:SS.")]
    InvalidTime(String),
    #[error("Timezone offset of {0} minutes is out of range.")]
    OffsetOutOfRange(i64),
}

// `offset_minutes` is subtracted from local time to reach UTC: UTC+5:30
// is 330, UTC-2:00 is -120. Pure conversion, no range policy here.
pub fn to_utc_epoch(
    date: &str,
    start_time: &str,
    end_time: &str,
    offset_minutes: i64,
) -> Result<(EpochMillis, EpochMillis), TimeParseError> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| TimeParseError::InvalidDate(date.to_owned()))?;
    let start = parse_time_of_day(start_time)?;
    let end = parse_time_of_day(end_time)?;
    Ok((
        to_epoch(day, start, offset_minutes)?,
        to_epoch(day, end, offset_minutes)?,
    ))
}

fn parse_time_of_day(value: &str) -> Result<NaiveTime, TimeParseError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| TimeParseError::InvalidTime(value.to_owned()))
}

fn to_epoch(
    day: NaiveDate,
    time: NaiveTime,
    offset_minutes: i64,
) -> Result<EpochMillis, TimeParseError> {
    // The naive timestamp is read as if it were UTC; subtracting the
    // offset lands it on the real UTC timeline.
    let naive_millis = day.and_time(time).and_utc().timestamp_millis();
    offset_minutes
        .checked_mul(MILLIS_PER_MINUTE)
        .and_then(|offset_millis| naive_millis.checked_sub(offset_millis))
        .ok_or(TimeParseError::OffsetOutOfRange(offset_minutes))
}
