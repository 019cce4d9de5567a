use chrono::{DateTime, Utc};

use crate::{WindowError, WindowResult};

pub const MICROS_PER_MILLI: i64 = 1_000;

/// Truncates towards zero, so `-1500us` becomes `-1ms`.
pub fn us_to_ms(time_us: i64) -> i64 {
    time_us / MICROS_PER_MILLI
}

pub fn ms_to_us(time_ms: i64) -> WindowResult<i64> {
    time_ms
        .checked_mul(MICROS_PER_MILLI)
        .ok_or(WindowError::TimeOverflow)
}

pub fn datetime_to_us(time: &DateTime<Utc>) -> i64 {
    time.timestamp_micros()
}

pub fn us_to_datetime(time_us: i64) -> WindowResult<DateTime<Utc>> {
    DateTime::from_timestamp_micros(time_us).ok_or(WindowError::TimeOverflow)
}
