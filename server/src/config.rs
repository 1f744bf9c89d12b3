use clap::Parser;
use std::time::Duration;

/// Fear bingo session server
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Maximum number of connected viewers
    #[arg(short, long, default_value = "64")]
    pub max_viewers: usize,

    /// Seconds without a packet before a viewer is dropped
    #[arg(long, default_value = "30")]
    pub viewer_timeout: u64,

    /// Seconds between status log lines
    #[arg(long, default_value = "60")]
    pub status_interval: u64,

    /// Seed for draws, shuffles and player tokens (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn viewer_timeout(&self) -> Duration {
        Duration::from_secs(self.viewer_timeout)
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval.max(1))
    }
}
