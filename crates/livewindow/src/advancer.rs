//! Incremental advancement of a located window.
//!
//! Both cursors only move forward: the trailing cursor evicts periods that ended at or before
//! the new window start, the leading cursor appends periods that started before the new now.
//! The result is identical to locating the window from scratch at the new now.
use crate::{
    locator::{seek_live_edge, seek_period_containing, window_start_time_us, WindowBounds},
    pattern::PeriodPattern,
    WindowError, WindowResult,
};

/// Advances `bounds` by `delta_us`.
///
/// The availability start and window duration are taken from `bounds`. `pattern` must be the
/// pattern `bounds` was located with: a new pattern is a reset, not an advance.
pub fn advance(
    pattern: &PeriodPattern,
    bounds: &WindowBounds,
    delta_us: i64,
) -> WindowResult<WindowBounds> {
    if delta_us < 0 {
        return Err(WindowError::TimeWentBackwards { delta_us });
    }

    let now_us = bounds
        .now_us
        .checked_add(delta_us)
        .ok_or(WindowError::TimeOverflow)?;
    let window_start_time_us = window_start_time_us(
        bounds.availability_start_time_us,
        bounds.live_window_duration_us,
        now_us,
    )?;

    // The window start never moves backwards, so the previous first period is a valid cursor.
    let (first_period_index, first_period_start_us) = seek_period_containing(
        pattern,
        bounds.first_period_index,
        bounds.first_period_start_us,
        window_start_time_us,
    )?;

    let (leading_index, leading_start_us) = if bounds.last_period_index >= first_period_index {
        (bounds.last_period_index, bounds.last_period_start_us)
    } else {
        (first_period_index, first_period_start_us)
    };
    let (last_period_index, last_period_start_us) =
        seek_live_edge(pattern, leading_index, leading_start_us, now_us)?;

    tracing::trace!(
        delta_us,
        evicted = first_period_index - bounds.first_period_index,
        appended = last_period_index - bounds.last_period_index,
        "Advanced live window"
    );

    Ok(WindowBounds {
        first_period_index,
        last_period_index,
        first_period_start_us,
        last_period_start_us,
        window_start_time_us,
        now_us,
        ..*bounds
    })
}
