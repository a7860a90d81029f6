use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client configuration loaded from environment variables.
/// Every value has a default; only malformed values are rejected.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub http_timeout_secs: u64,
    /// Fall back to the built-in demo data when a screen's fetch fails.
    pub demo_fallback: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let session_file = match std::env::var("SKILLSURGE_SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_session_file()?,
        };

        Ok(Config {
            api_url: std::env::var("SKILLSURGE_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            session_file,
            http_timeout_secs: match std::env::var("SKILLSURGE_HTTP_TIMEOUT_SECS") {
                Ok(v) => v
                    .parse::<u64>()
                    .context("SKILLSURGE_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            },
            demo_fallback: match std::env::var("SKILLSURGE_DEMO_FALLBACK") {
                Ok(v) => parse_bool(&v)
                    .with_context(|| format!("SKILLSURGE_DEMO_FALLBACK must be true/false, got '{v}'"))?,
                Err(_) => true,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// `<platform config dir>/skillsurge/session.json`
fn default_session_file() -> Result<PathBuf> {
    let base = dirs::config_dir().context("no config directory found; set SKILLSURGE_SESSION_FILE")?;
    Ok(base.join("skillsurge").join("session.json"))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
