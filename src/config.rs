use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_BIND: &str = "127.0.0.1:5173";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub bind_addr: SocketAddr,
    pub public_url: Url,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let bind_addr: SocketAddr = env_or("SECOND_BRAIN_BIND", DEFAULT_BIND)
            .parse()
            .context("SECOND_BRAIN_BIND must be a socket address such as 127.0.0.1:5173")?;

        let public_url = match std::env::var("SECOND_BRAIN_PUBLIC_URL") {
            Ok(url) => url,
            Err(_) => format!("http://{bind_addr}"),
        };

        Ok(Config {
            api_url: Url::parse(&env_or("SECOND_BRAIN_API_URL", DEFAULT_API_URL))
                .context("SECOND_BRAIN_API_URL must be an absolute URL")?,
            bind_addr,
            public_url: Url::parse(&public_url)
                .context("SECOND_BRAIN_PUBLIC_URL must be an absolute URL")?,
            request_timeout: Duration::from_secs(
                env_or("SECOND_BRAIN_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string())
                    .parse::<u64>()
                    .context("SECOND_BRAIN_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Public URL of the read-only view for `share_id`.
    pub fn share_url(&self, share_id: &str) -> String {
        format!(
            "{}/share/{}",
            self.public_url.as_str().trim_end_matches('/'),
            urlencoding::encode(share_id)
        )
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
