//! Server configuration, read from the command line or the environment.
//!
//! Replication settings are not part of it: they are stored in the database
//! and edited through `/api/settings`.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "aggregator", about = "Forwards form entries to a central site")]
pub struct ServerConfig {
    #[arg(long, env = "AGGREGATOR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "AGGREGATOR_PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite database holding settings, forms and entries.
    #[arg(long, env = "AGGREGATOR_DATABASE", default_value = "aggregator.sqlite")]
    pub database: PathBuf,

    /// Installation name, used as the site identifier when none is configured.
    #[arg(long, env = "AGGREGATOR_SITE_NAME", default_value = "Aggregator")]
    pub site_name: String,

    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, env = "AGGREGATOR_LOG", default_value = "info")]
    pub log_filter: String,
}

impl ServerConfig {
    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
