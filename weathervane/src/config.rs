//! Command-line configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::api::DEFAULT_API_BASE;

/// Terminal weather lookup with an animated ambient backdrop
#[derive(Parser, Debug, Clone)]
#[command(name = "weathervane", version)]
#[command(about = "Look up the weather for a city, with an ambient backdrop")]
pub struct Config {
    /// City to prefill and look up on start
    #[arg(long, short)]
    pub city: Option<String>,

    /// Base URL of the weather service
    #[arg(long, env = "WEATHERVANE_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Length of the start-up splash, in milliseconds
    #[arg(long, default_value_t = 1500)]
    pub warmup_ms: u64,

    /// Write logs here (filter with RUST_LOG); logging is off without it
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Disable the animated backdrop
    #[arg(long)]
    pub no_backdrop: bool,
}

impl Config {
    pub fn warmup(&self) -> Duration {
        Duration::from_millis(self.warmup_ms)
    }

    pub fn initial_city(&self) -> &str {
        self.city.as_deref().unwrap_or_default()
    }
}
