use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    ads::AdInsertion,
    pattern::{PatternSlot, PeriodPattern, AD_PERIOD_DURATION_MS, PERIOD_DURATION_MS},
    period::PeriodKind,
    time::{datetime_to_us, ms_to_us},
    timeline::{TimelineParams, DEFAULT_TARGET_OFFSET_US},
    WindowError, WindowResult,
};

/// Serializable description of a live timeline.
///
/// ```toml
/// availability_start = "1970-01-01T00:00:00Z"
/// live_window_duration_us = 60_000_000
/// ads = "unpopulated"
///
/// [[pattern]]
/// kind = "content"
///
/// [[pattern]]
/// kind = "ad"
/// duration_ms = 15_000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_availability_start")]
    pub availability_start: DateTime<Utc>,
    pub live_window_duration_us: i64,
    #[serde(default = "default_target_offset_ms")]
    pub target_offset_ms: i64,
    #[serde(default)]
    pub ads: AdInsertion,
    pub pattern: Vec<SlotConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotConfig {
    pub kind: PeriodKind,
    /// Falls back to the default content or ad period duration.
    pub duration_ms: Option<i64>,
}

fn default_availability_start() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

fn default_target_offset_ms() -> i64 {
    DEFAULT_TARGET_OFFSET_US / 1_000
}

impl TimelineConfig {
    pub fn load(path: impl AsRef<Path>) -> WindowResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    pub fn from_toml_str(data: &str) -> WindowResult<Self> {
        Ok(toml::from_str(data)?)
    }

    pub fn to_params(&self) -> WindowResult<TimelineParams> {
        if self.target_offset_ms < 0 {
            return Err(WindowError::InvalidConfig(format!(
                "target_offset_ms must not be negative, got {}",
                self.target_offset_ms
            )));
        }

        let slots = self
            .pattern
            .iter()
            .map(|slot| {
                let duration_ms = slot.duration_ms.unwrap_or(match slot.kind {
                    PeriodKind::Content => PERIOD_DURATION_MS,
                    PeriodKind::Ad => AD_PERIOD_DURATION_MS,
                });
                Ok(PatternSlot {
                    kind: slot.kind,
                    duration_us: ms_to_us(duration_ms)?,
                })
            })
            .collect::<WindowResult<_>>()?;
        let pattern = PeriodPattern::from_slots(slots)?;

        Ok(TimelineParams::new(
            pattern,
            datetime_to_us(&self.availability_start),
            self.live_window_duration_us,
        )?
        .with_ad_insertion(self.ads)
        .with_target_offset_us(ms_to_us(self.target_offset_ms)?)?)
    }
}
