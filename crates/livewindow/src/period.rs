use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::{ads::AdMetadata, WindowError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodKind {
    Content,
    Ad,
}

impl PeriodKind {
    pub fn is_ad(self) -> bool {
        matches!(self, Self::Ad)
    }

    fn tag(self) -> char {
        match self {
            Self::Content => 'c',
            Self::Ad => 'a',
        }
    }
}

/// Identity of a period in the endless sequence.
///
/// Only depends on the index and the kind of the period, so the same period keeps the same
/// uid no matter when, or how often, the window containing it was computed. Formats as
/// `uid-<index>[c]` for content and `uid-<index>[a]` for ads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeriodUid {
    index: u64,
    kind: PeriodKind,
}

impl PeriodUid {
    pub fn new(index: u64, kind: PeriodKind) -> Self {
        Self { index, kind }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn kind(&self) -> PeriodKind {
        self.kind
    }
}

impl fmt::Display for PeriodUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "uid-{}[{}]", self.index, self.kind.tag())
    }
}

impl FromStr for PeriodUid {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WindowError::InvalidUid(s.to_string());

        let body = s.strip_prefix("uid-").ok_or_else(invalid)?;
        let (index, kind) = body
            .strip_suffix(']')
            .and_then(|body| body.split_once('['))
            .ok_or_else(invalid)?;
        let kind = match kind {
            "c" => PeriodKind::Content,
            "a" => PeriodKind::Ad,
            _ => return Err(invalid()),
        };
        if !index.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let index = index.parse().map_err(|_| invalid())?;

        Ok(Self { index, kind })
    }
}

impl Serialize for PeriodUid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A period materialized inside a live window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub uid: PeriodUid,
    /// `None` for the period at the live edge, which is still being produced.
    pub duration_us: Option<i64>,
    /// Start of the period relative to the window start. Negative when the window starts
    /// inside this period.
    pub position_in_window_us: i64,
    pub ad: AdMetadata,
}

impl Period {
    /// Position of the period in the endless sequence, counted from availability start.
    pub fn id(&self) -> u64 {
        self.uid.index()
    }

    pub fn kind(&self) -> PeriodKind {
        self.uid.kind()
    }

    pub fn is_ad(&self) -> bool {
        self.uid.kind().is_ad()
    }
}
