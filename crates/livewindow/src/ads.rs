use serde::{Deserialize, Serialize};

use crate::period::PeriodKind;

/// How ad metadata is attached to the periods of a live window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdInsertion {
    /// A content timeline: no period carries ad metadata.
    #[default]
    ContentOnly,
    /// Ad periods are known to be ads, but nobody has described them yet. Every period only
    /// carries the live post-roll placeholder.
    Unpopulated,
    /// Every ad period carries a server-side inserted ad group with a single ad spanning the
    /// whole period.
    Populated {
        #[serde(default)]
        played: bool,
    },
}

impl AdInsertion {
    pub fn metadata_for(self, kind: PeriodKind, duration_us: i64) -> AdMetadata {
        match self {
            Self::ContentOnly => AdMetadata::None,
            Self::Populated { played } if kind.is_ad() => {
                AdMetadata::Populated(AdGroup::single_ad(duration_us, played))
            }
            Self::Unpopulated | Self::Populated { .. } => AdMetadata::Placeholder,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdGroupTime {
    /// Offset from the start of the period.
    Us(i64),
    /// The group plays once the period ends.
    EndOfSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdGroup {
    pub time: AdGroupTime,
    /// `None` while the number of ads is still unknown.
    pub count: Option<u32>,
    pub durations_us: Vec<i64>,
    pub content_resume_offset_us: i64,
    pub server_side_inserted: bool,
    pub played: bool,
}

static LIVE_POSTROLL_PLACEHOLDER: AdGroup = AdGroup::live_postroll_placeholder();

impl AdGroup {
    pub const fn live_postroll_placeholder() -> Self {
        Self {
            time: AdGroupTime::EndOfSource,
            count: None,
            durations_us: Vec::new(),
            content_resume_offset_us: 0,
            server_side_inserted: true,
            played: false,
        }
    }

    pub fn single_ad(duration_us: i64, played: bool) -> Self {
        Self {
            time: AdGroupTime::Us(0),
            count: Some(1),
            durations_us: vec![duration_us],
            content_resume_offset_us: duration_us,
            server_side_inserted: true,
            played,
        }
    }

    pub fn is_live_postroll_placeholder(&self) -> bool {
        self.time == AdGroupTime::EndOfSource && self.count.is_none()
    }

    pub fn ad_duration_us(&self, ad_index: usize) -> Option<i64> {
        self.durations_us.get(ad_index).copied()
    }
}

/// Ad state of a single period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum AdMetadata {
    None,
    /// Only the trailing live post-roll placeholder group.
    Placeholder,
    /// A populated ad group, followed by the live post-roll placeholder group.
    Populated(AdGroup),
}

impl AdMetadata {
    pub fn ad_group_count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Placeholder => 1,
            Self::Populated(_) => 2,
        }
    }

    pub fn ad_group(&self, index: usize) -> Option<&AdGroup> {
        match (self, index) {
            (Self::Placeholder, 0) | (Self::Populated(_), 1) => Some(&LIVE_POSTROLL_PLACEHOLDER),
            (Self::Populated(group), 0) => Some(group),
            _ => None,
        }
    }

    pub fn ad_groups(&self) -> impl Iterator<Item = &AdGroup> {
        (0..self.ad_group_count()).filter_map(|index| self.ad_group(index))
    }

    pub fn ends_with_live_postroll_placeholder(&self) -> bool {
        self.ad_groups()
            .last()
            .is_some_and(AdGroup::is_live_postroll_placeholder)
    }
}
