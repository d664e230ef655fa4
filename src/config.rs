//! Server configuration

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Read-only HTTP API for census-tract rental statistics and property-tax data
#[derive(Parser, Debug, Clone)]
#[command(name = "tract_rents")]
pub struct Config {
    /// Listen address
    #[arg(long, default_value = "127.0.0.1:3000", env = "TRACT_RENTS_LISTEN")]
    pub listen: SocketAddr,

    /// SQLite database file
    #[arg(long, default_value = "tract_rents.sqlite3", env = "TRACT_RENTS_DATABASE")]
    pub database: String,

    /// Schema applied at startup (statements must be idempotent)
    #[arg(long, default_value = "sql/schema.sql", env = "TRACT_RENTS_SCHEMA")]
    pub schema: String,

    /// Worker threads serving requests
    #[arg(long, default_value_t = 8, env = "TRACT_RENTS_MAX_WORKERS")]
    pub max_workers: usize,

    /// Per-request query deadline in milliseconds (0 disables)
    #[arg(long, default_value_t = 10_000, env = "TRACT_RENTS_QUERY_TIMEOUT_MS")]
    pub query_timeout_ms: u64,

    /// Log filter, e.g. `info` or `tract_rents=debug`
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log: String,
}

impl Config {
    pub fn query_timeout(&self) -> Option<Duration> {
        (self.query_timeout_ms > 0).then(|| Duration::from_millis(self.query_timeout_ms))
    }
}
