use serde::{Deserialize, Serialize};

use crate::{
    period::{PeriodKind, PeriodUid},
    time::ms_to_us,
    WindowError, WindowResult,
};

/// Default duration of a content period.
pub const PERIOD_DURATION_MS: i64 = 30_000;
/// Default duration of an ad period.
pub const AD_PERIOD_DURATION_MS: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSlot {
    pub kind: PeriodKind,
    pub duration_us: i64,
}

/// The repeating pattern that generates the endless period sequence.
///
/// Period `i` takes its kind and duration from slot `i mod N`. One full repetition of the
/// pattern is a cycle; the duration of any `N` consecutive periods equals the cycle duration,
/// wherever the run starts, which lets the window jump across whole cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodPattern {
    slots: Vec<PatternSlot>,
    cycle_duration_us: i64,
}

impl PeriodPattern {
    pub fn new(kinds: Vec<PeriodKind>, durations_us: Vec<i64>) -> WindowResult<Self> {
        if kinds.len() != durations_us.len() {
            return Err(WindowError::PatternLengthMismatch {
                kinds: kinds.len(),
                durations: durations_us.len(),
            });
        }

        Self::from_slots(
            kinds
                .into_iter()
                .zip(durations_us)
                .map(|(kind, duration_us)| PatternSlot { kind, duration_us })
                .collect(),
        )
    }

    /// All content periods share one duration, all ad periods another.
    pub fn uniform(
        kinds: Vec<PeriodKind>,
        content_duration_us: i64,
        ad_duration_us: i64,
    ) -> WindowResult<Self> {
        let durations_us = kinds
            .iter()
            .map(|kind| match kind {
                PeriodKind::Content => content_duration_us,
                PeriodKind::Ad => ad_duration_us,
            })
            .collect();
        Self::new(kinds, durations_us)
    }

    /// Builds a pattern from ad flags and millisecond durations.
    pub fn from_ad_flags(ad_flags: &[bool], durations_ms: &[i64]) -> WindowResult<Self> {
        let kinds = ad_flags
            .iter()
            .map(|is_ad| if *is_ad { PeriodKind::Ad } else { PeriodKind::Content })
            .collect();
        let durations_us = durations_ms
            .iter()
            .map(|duration_ms| ms_to_us(*duration_ms))
            .collect::<WindowResult<_>>()?;
        Self::new(kinds, durations_us)
    }

    pub fn from_slots(slots: Vec<PatternSlot>) -> WindowResult<Self> {
        if slots.is_empty() {
            return Err(WindowError::EmptyPattern);
        }

        let mut cycle_duration_us: i64 = 0;
        for (slot, PatternSlot { duration_us, .. }) in slots.iter().enumerate() {
            if *duration_us <= 0 {
                return Err(WindowError::InvalidPeriodDuration {
                    slot,
                    duration_us: *duration_us,
                });
            }
            cycle_duration_us = cycle_duration_us
                .checked_add(*duration_us)
                .ok_or(WindowError::TimeOverflow)?;
        }

        Ok(Self {
            slots,
            cycle_duration_us,
        })
    }

    fn slot(&self, index: u64) -> &PatternSlot {
        &self.slots[(index % self.slots.len() as u64) as usize]
    }

    pub fn kind_of(&self, index: u64) -> PeriodKind {
        self.slot(index).kind
    }

    pub fn duration_of(&self, index: u64) -> i64 {
        self.slot(index).duration_us
    }

    pub fn uid_of(&self, index: u64) -> PeriodUid {
        PeriodUid::new(index, self.kind_of(index))
    }

    /// Number of periods in one cycle.
    pub fn cycle_len(&self) -> u64 {
        self.slots.len() as u64
    }

    pub fn cycle_duration_us(&self) -> i64 {
        self.cycle_duration_us
    }

    pub fn slots(&self) -> &[PatternSlot] {
        &self.slots
    }
}
