use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use livewindow::{
    time::{datetime_to_us, us_to_datetime},
    LiveTimeline, LiveWindow, TimelineConfig,
};

#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct LwsimArgs {
    /// Timeline config file
    #[clap(short, long, env = "LWSIM_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Current time in microseconds since unix epoch
    ///
    /// Defaults to the system clock.
    #[clap(long)]
    now_us: Option<i64>,

    /// Microseconds to move forward on every tick
    #[clap(long, default_value = "1000000")]
    advance_us: i64,

    /// Number of ticks to print after the initial window
    #[clap(long, default_value = "0")]
    ticks: u32,

    /// Print windows as JSON lines
    #[clap(long)]
    json: bool,
}

impl LwsimArgs {
    fn run(self) -> anyhow::Result<()> {
        if self.advance_us < 0 {
            bail!("--advance-us must not be negative");
        }

        let config = TimelineConfig::load(&self.config)?;
        let params = config.to_params()?;
        let now_us = self
            .now_us
            .unwrap_or_else(|| datetime_to_us(&chrono::Utc::now()));
        tracing::info!(
            config = %self.config.display(),
            now_us,
            pattern_slots = params.pattern.cycle_len(),
            "Loaded timeline"
        );

        let mut timeline = LiveTimeline::new(params, now_us)?;
        self.print(&timeline.snapshot())?;
        for _ in 0..self.ticks {
            let window = timeline.advance_now_us(self.advance_us)?;
            self.print(&window)?;
        }

        Ok(())
    }

    fn print(&self, window: &LiveWindow) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(window)?);
            return Ok(());
        }

        println!(
            "now={}us window_start={}ms ({}) duration={}us default_position={}us",
            window.now_us(),
            window.window_start_time_ms(),
            us_to_datetime(window.window_start_time_us())?.to_rfc3339(),
            window.duration_us(),
            window.default_position_us(),
        );
        for period in window.periods() {
            let duration = period
                .duration_us
                .map(|d| format!("{d}us"))
                .unwrap_or_else(|| "unset".to_string());
            println!(
                "  {:<12} {:<8} {:>16}us {:>14} ad_groups={}",
                period.uid.to_string(),
                if period.is_ad() { "ad" } else { "content" },
                period.position_in_window_us,
                duration,
                period.ad.ad_group_count(),
            );
        }

        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .try_from_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    LwsimArgs::parse().run()
}
