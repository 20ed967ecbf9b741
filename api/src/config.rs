use clap::{Parser, ValueEnum};
use std::{fmt, net::SocketAddr, path::PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Users CRUD API backed by an in-memory store")]
pub struct FritApiConfig {
    #[clap(
        short,
        long,
        env = "FRIT_API_BIND_ADDR",
        default_value = "0.0.0.0:3001"
    )]
    pub bind_addr: SocketAddr,

    /// Base URL clients reach the API on. Only used in documentation output.
    #[clap(
        long,
        env = "FRIT_API_PUBLIC_URL",
        default_value = "http://localhost:3001"
    )]
    pub public_url: String,

    /// Selects the log format: human-readable in development, JSON lines in
    /// production.
    #[clap(
        long,
        env = "FRIT_API_ENVIRONMENT",
        value_enum,
        default_value_t = Environment::Development
    )]
    pub environment: Environment,

    /// Directory holding the browser client. Served for any path that no API
    /// route claims.
    #[clap(long, env = "FRIT_API_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Start with an empty user list instead of the three seed records.
    #[clap(long, default_value_t = false)]
    pub no_seed: bool,

    #[clap(long, default_value_t = false)]
    pub dump_openapi: bool,
}

impl FritApiConfig {
    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
