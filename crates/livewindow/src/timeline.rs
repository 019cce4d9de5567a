use std::sync::Arc;

use crate::{
    ads::AdInsertion, pattern::PeriodPattern, window::LiveWindow, WindowError, WindowResult,
};

/// Default distance between the live edge and the default playback position.
pub const DEFAULT_TARGET_OFFSET_US: i64 = 10_000_000;

/// Everything that defines a live timeline except the current time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineParams {
    pub pattern: PeriodPattern,
    /// Absolute time at which period 0 started.
    pub availability_start_time_us: i64,
    pub live_window_duration_us: i64,
    pub ad_insertion: AdInsertion,
    pub target_offset_us: i64,
}

impl TimelineParams {
    pub fn new(
        pattern: PeriodPattern,
        availability_start_time_us: i64,
        live_window_duration_us: i64,
    ) -> WindowResult<Self> {
        if live_window_duration_us <= 0 {
            return Err(WindowError::InvalidWindowDuration(live_window_duration_us));
        }

        Ok(Self {
            pattern,
            availability_start_time_us,
            live_window_duration_us,
            ad_insertion: AdInsertion::default(),
            target_offset_us: DEFAULT_TARGET_OFFSET_US,
        })
    }

    pub fn with_ad_insertion(mut self, ad_insertion: AdInsertion) -> Self {
        self.ad_insertion = ad_insertion;
        self
    }

    pub fn with_target_offset_us(mut self, target_offset_us: i64) -> WindowResult<Self> {
        if target_offset_us < 0 {
            return Err(WindowError::InvalidTargetOffset(target_offset_us));
        }

        self.target_offset_us = target_offset_us;
        Ok(self)
    }
}

/// Owner of the current live window.
///
/// There is a single writer, and every update publishes a fresh snapshot. Readers take a
/// snapshot with [`LiveTimeline::snapshot`] and keep using it for as long as they like.
#[derive(Debug)]
pub struct LiveTimeline {
    current: Arc<LiveWindow>,
}

impl LiveTimeline {
    pub fn new(params: TimelineParams, now_us: i64) -> WindowResult<Self> {
        let window = LiveWindow::locate(Arc::new(params), now_us)?;
        tracing::debug!(
            now_us,
            period_count = window.period_count(),
            "Created live timeline"
        );

        Ok(Self {
            current: Arc::new(window),
        })
    }

    pub fn snapshot(&self) -> Arc<LiveWindow> {
        self.current.clone()
    }

    pub fn params(&self) -> &TimelineParams {
        self.current.params()
    }

    pub fn now_us(&self) -> i64 {
        self.current.now_us()
    }

    /// Moves now forward by `delta_us`.
    ///
    /// Fails with [`WindowError::TimeWentBackwards`] for a negative delta, leaving the current
    /// window untouched. Use [`LiveTimeline::relocate`] to go back in time.
    pub fn advance_now_us(&mut self, delta_us: i64) -> WindowResult<Arc<LiveWindow>> {
        let window = self.current.advance(delta_us)?;
        self.current = Arc::new(window);
        Ok(self.snapshot())
    }

    /// Locates the window at `now_us` from scratch. Unlike advancing, `now_us` may be earlier
    /// than the current time.
    pub fn relocate(&mut self, now_us: i64) -> WindowResult<Arc<LiveWindow>> {
        let window = self.current.relocate(now_us)?;
        tracing::debug!(
            from_us = self.now_us(),
            to_us = now_us,
            "Relocated live window"
        );

        self.current = Arc::new(window);
        Ok(self.snapshot())
    }

    /// Replaces the timeline parameters. This is a full reset at the current time.
    pub fn reconfigure(&mut self, params: TimelineParams) -> WindowResult<Arc<LiveWindow>> {
        let now_us = self.now_us();
        let window = LiveWindow::locate(Arc::new(params), now_us)?;
        tracing::debug!(
            now_us,
            period_count = window.period_count(),
            "Reset live timeline with new parameters"
        );

        self.current = Arc::new(window);
        Ok(self.snapshot())
    }
}
