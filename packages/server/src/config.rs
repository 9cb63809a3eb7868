//! Command-line / environment configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "accentswap-server")]
#[command(about = "Language-exchange matchmaking and WebRTC signaling server", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "ACCENTSWAP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "ACCENTSWAP_PORT", default_value_t = 8080)]
    pub port: u16,

    /// JSON file with the user profiles to seed the profile store
    #[arg(long, env = "ACCENTSWAP_PROFILES")]
    pub profiles: Option<PathBuf>,

    /// Lifetime of a signaling room in seconds
    #[arg(
        long,
        env = "ACCENTSWAP_ROOM_TTL_SECS",
        default_value_t = 3600,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub room_ttl_secs: u64,

    /// Interval between expired-room sweeps in seconds
    #[arg(
        long,
        env = "ACCENTSWAP_SWEEP_INTERVAL_SECS",
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub sweep_interval_secs: u64,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, env = "ACCENTSWAP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn room_ttl_millis(&self) -> i64 {
        i64::try_from(self.room_ttl_secs.saturating_mul(1_000)).unwrap_or(i64::MAX)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
