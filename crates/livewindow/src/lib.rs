//! A sliding live window over an endless sequence of content and ad periods.
//!
//! The sequence repeats a fixed [`PeriodPattern`] from the availability start on. At any
//! point in time, only the periods overlapping the trailing live window are visible:
//!
//! ```text
//!                     ┌──────────── live window ────────────┐
//!  ... ┬──────────────┼──────┬──────┬──────────────┬──────┬─┼───────────── ...
//!      │   content    │  ad  │  ad  │   content    │  ad  │ │ ad (live)
//!  ... ┴──────────────┼──────┴──────┴──────────────┴──────┴─┼───────────── ...
//!      ^ first period │                              last period ^
//!                     window start                          now
//! ```
//!
//! [`locator::locate`] finds the window from scratch, [`advancer::advance`] moves an existing
//! one forward in time, and both always agree. [`LiveWindow`] materializes the visible
//! periods and [`LiveTimeline`] publishes snapshots as time goes by.
pub mod ads;
pub mod advancer;
pub mod config;
pub mod error;
pub mod locator;
pub mod pattern;
pub mod period;
pub mod time;
pub mod timeline;
pub mod window;

pub use ads::{AdGroup, AdGroupTime, AdInsertion, AdMetadata};
pub use config::TimelineConfig;
pub use error::{WindowError, WindowResult};
pub use locator::WindowBounds;
pub use pattern::{PeriodPattern, AD_PERIOD_DURATION_MS, PERIOD_DURATION_MS};
pub use period::{Period, PeriodKind, PeriodUid};
pub use timeline::{LiveTimeline, TimelineParams};
pub use window::LiveWindow;
