use std::sync::Arc;

use serde::Serialize;

use crate::{
    advancer,
    locator::{self, WindowBounds},
    period::{Period, PeriodUid},
    time::us_to_ms,
    timeline::TimelineParams,
    WindowResult,
};

/// An immutable snapshot of the live window at one point in time.
///
/// Advancing time produces a new snapshot. Readers holding an older snapshot never observe
/// the change.
#[derive(Debug, Clone, Serialize)]
pub struct LiveWindow {
    #[serde(skip)]
    params: Arc<TimelineParams>,
    bounds: WindowBounds,
    periods: Vec<Period>,
}

impl LiveWindow {
    /// Locates the window at `now_us` from scratch.
    pub fn locate(params: Arc<TimelineParams>, now_us: i64) -> WindowResult<Self> {
        let bounds = locator::locate(
            &params.pattern,
            params.availability_start_time_us,
            params.live_window_duration_us,
            now_us,
        )?;
        Ok(Self::materialize(params, bounds))
    }

    /// Returns the window `delta_us` later, reusing the bounds of this one.
    pub fn advance(&self, delta_us: i64) -> WindowResult<Self> {
        let bounds = advancer::advance(&self.params.pattern, &self.bounds, delta_us)?;
        Ok(Self::materialize(self.params.clone(), bounds))
    }

    /// Locates the window at `now_us` from scratch with the same parameters.
    pub fn relocate(&self, now_us: i64) -> WindowResult<Self> {
        Self::locate(self.params.clone(), now_us)
    }

    fn materialize(params: Arc<TimelineParams>, bounds: WindowBounds) -> Self {
        let mut periods = Vec::with_capacity(bounds.period_count());
        let mut position_in_window_us = bounds.position_of_first_period_in_window_us();

        for index in bounds.first_period_index..=bounds.last_period_index {
            let uid = params.pattern.uid_of(index);
            let duration_us = params.pattern.duration_of(index);
            periods.push(Period {
                uid,
                duration_us: (index != bounds.last_period_index).then_some(duration_us),
                position_in_window_us,
                ad: params.ad_insertion.metadata_for(uid.kind(), duration_us),
            });
            // Every period but the last starts before now, so its end still fits in the window.
            if index < bounds.last_period_index {
                position_in_window_us += duration_us;
            }
        }

        Self {
            params,
            bounds,
            periods,
        }
    }

    pub fn params(&self) -> &TimelineParams {
        &self.params
    }

    pub fn bounds(&self) -> &WindowBounds {
        &self.bounds
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn period(&self, period_index: usize) -> Option<&Period> {
        self.periods.get(period_index)
    }

    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Index inside this window of the period with `uid`, if it is visible.
    pub fn index_of_period(&self, uid: &PeriodUid) -> Option<usize> {
        let index = uid.index();
        if !self.bounds.contains(index) || self.params.pattern.kind_of(index) != uid.kind() {
            return None;
        }
        Some((index - self.bounds.first_period_index) as usize)
    }

    pub fn now_us(&self) -> i64 {
        self.bounds.now_us
    }

    pub fn window_start_time_us(&self) -> i64 {
        self.bounds.window_start_time_us
    }

    /// Window start in milliseconds, truncated the way a DASH source reports it: the first
    /// period start and the offset into it are truncated separately.
    ///
    /// `ms_to_us(window_start_time_ms) + position_in_first_period_us % 1000` recovers the exact
    /// window start as long as period boundaries fall on whole milliseconds.
    pub fn window_start_time_ms(&self) -> i64 {
        us_to_ms(self.bounds.first_period_start_us) + us_to_ms(self.position_in_first_period_us())
    }

    pub fn position_in_first_period_us(&self) -> i64 {
        -self.bounds.position_of_first_period_in_window_us()
    }

    pub fn duration_us(&self) -> i64 {
        self.bounds.duration_us()
    }

    /// Where playback starts by default: the target live offset before the live edge.
    pub fn default_position_us(&self) -> i64 {
        self.duration_us()
            .saturating_sub(self.params.target_offset_us)
            .max(0)
    }

    /// Absolute start time of the period at `period_index` in this window.
    pub fn period_start_time_us(&self, period_index: usize) -> Option<i64> {
        self.period(period_index)
            .map(|period| self.bounds.window_start_time_us + period.position_in_window_us)
    }
}
