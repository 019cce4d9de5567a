use thiserror::Error;

#[derive(Error, Debug)]
pub enum WindowError {
    // Period pattern errors
    #[error("Period pattern must contain at least one slot")]
    EmptyPattern,

    #[error("Period pattern has {kinds} kinds but {durations} durations")]
    PatternLengthMismatch { kinds: usize, durations: usize },

    #[error("Invalid duration {duration_us}us at pattern slot {slot}")]
    InvalidPeriodDuration { slot: usize, duration_us: i64 },

    // Window errors
    #[error("Live window duration must be positive, got {0}us")]
    InvalidWindowDuration(i64),

    #[error("Target live offset must not be negative, got {0}us")]
    InvalidTargetOffset(i64),

    #[error("Now ({now_us}us) is before availability start ({availability_start_us}us)")]
    NowBeforeAvailabilityStart {
        now_us: i64,
        availability_start_us: i64,
    },

    /// The incremental advancer only moves forward. Locate the window again to go back in time.
    #[error("Time went backwards by {delta_us}us")]
    TimeWentBackwards { delta_us: i64 },

    #[error("Time arithmetic overflowed")]
    TimeOverflow,

    #[error("Invalid period uid: {0}")]
    InvalidUid(String),

    // Configuration errors
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    ConfigParseError(#[from] toml::de::Error),

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

pub type WindowResult<T> = Result<T, WindowError>;
