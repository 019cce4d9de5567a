//! Cold-start computation of the live window.
//!
//! The window is the half-open interval `[window_start, now)`. A period whose end equals the
//! window start is not part of the window, and neither is a period starting exactly at now.
//!
//! ```text
//!  availability start                    window start                        now
//!  |                                     |                                   |
//!  |  c0  | a1 | a2 |  c3  | a4 | a5 |   c6 ...    | a7 | a8 |  c9  | a10 | a11 |  c12 ...
//!         ^ whole cycles are skipped ^   ^ first                             ^ last
//! ```
use serde::Serialize;

use crate::{pattern::PeriodPattern, WindowError, WindowResult};

/// Bounds of a live window in the endless period sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowBounds {
    pub first_period_index: u64,
    pub last_period_index: u64,
    /// Absolute start time of the first period, at or before the window start.
    pub first_period_start_us: i64,
    /// Absolute start time of the last period, strictly before now unless the window is empty
    /// because now equals the availability start.
    pub last_period_start_us: i64,
    pub window_start_time_us: i64,
    pub now_us: i64,
    /// Availability start the bounds were located with.
    pub availability_start_time_us: i64,
    /// Requested live window duration the bounds were located with.
    pub live_window_duration_us: i64,
}

impl WindowBounds {
    pub fn period_count(&self) -> usize {
        (self.last_period_index - self.first_period_index + 1) as usize
    }

    pub fn contains(&self, index: u64) -> bool {
        (self.first_period_index..=self.last_period_index).contains(&index)
    }

    /// Zero when the window starts on a period boundary, negative otherwise.
    pub fn position_of_first_period_in_window_us(&self) -> i64 {
        self.first_period_start_us - self.window_start_time_us
    }

    /// Effective window duration. Shorter than the requested live window duration while the
    /// stream has not been available for that long.
    pub fn duration_us(&self) -> i64 {
        self.now_us - self.window_start_time_us
    }
}

/// Computes the window start for `now_us`, clamped to the availability start.
pub(crate) fn window_start_time_us(
    availability_start_time_us: i64,
    live_window_duration_us: i64,
    now_us: i64,
) -> WindowResult<i64> {
    if live_window_duration_us <= 0 {
        return Err(WindowError::InvalidWindowDuration(live_window_duration_us));
    }
    if now_us < availability_start_time_us {
        return Err(WindowError::NowBeforeAvailabilityStart {
            now_us,
            availability_start_us: availability_start_time_us,
        });
    }

    let window_start_time_us = now_us.saturating_sub(live_window_duration_us);
    if window_start_time_us < availability_start_time_us {
        tracing::debug!(
            window_start_time_us,
            availability_start_time_us,
            "Window starts before availability, clamping"
        );
        return Ok(availability_start_time_us);
    }

    Ok(window_start_time_us)
}

/// Walks forward from the period `index` starting at `start_us` to the period containing
/// `time_us`, i.e. the one with `start <= time_us < end`.
///
/// Whole cycles between the cursor and `time_us` are skipped in one step, so the walk never
/// visits more than one cycle worth of periods.
pub(crate) fn seek_period_containing(
    pattern: &PeriodPattern,
    mut index: u64,
    mut start_us: i64,
    time_us: i64,
) -> WindowResult<(u64, i64)> {
    debug_assert!(start_us <= time_us);

    let distance_us = time_us
        .checked_sub(start_us)
        .ok_or(WindowError::TimeOverflow)?;
    let skipped_cycles = distance_us / pattern.cycle_duration_us();
    index += skipped_cycles as u64 * pattern.cycle_len();
    start_us += skipped_cycles * pattern.cycle_duration_us();

    loop {
        let duration_us = pattern.duration_of(index);
        // `time_us - start_us` is below one cycle here and can not overflow.
        if time_us - start_us < duration_us {
            return Ok((index, start_us));
        }
        start_us += duration_us;
        index += 1;
    }
}

/// Finds the last period of the window, searching from the period `index` starting at
/// `start_us`: the period with `start < now_us <= end`.
pub(crate) fn seek_live_edge(
    pattern: &PeriodPattern,
    index: u64,
    start_us: i64,
    now_us: i64,
) -> WindowResult<(u64, i64)> {
    // The window keeps at least its first period, even when it is empty.
    if now_us <= start_us {
        return Ok((index, start_us));
    }
    seek_period_containing(pattern, index, start_us, now_us - 1)
}

/// Locates the live window from scratch.
pub fn locate(
    pattern: &PeriodPattern,
    availability_start_time_us: i64,
    live_window_duration_us: i64,
    now_us: i64,
) -> WindowResult<WindowBounds> {
    let window_start_time_us =
        window_start_time_us(availability_start_time_us, live_window_duration_us, now_us)?;

    let (first_period_index, first_period_start_us) = seek_period_containing(
        pattern,
        0,
        availability_start_time_us,
        window_start_time_us,
    )?;
    let (last_period_index, last_period_start_us) =
        seek_live_edge(pattern, first_period_index, first_period_start_us, now_us)?;

    let bounds = WindowBounds {
        first_period_index,
        last_period_index,
        first_period_start_us,
        last_period_start_us,
        window_start_time_us,
        now_us,
        availability_start_time_us,
        live_window_duration_us,
    };
    tracing::debug!(
        first_period_index,
        last_period_index,
        window_start_time_us,
        position_of_first_period_in_window_us = bounds.position_of_first_period_in_window_us(),
        "Located live window"
    );

    Ok(bounds)
}
