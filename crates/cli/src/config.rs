use std::env;

use anyhow::{Context, Result};
use chrono_tz::Tz;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// CLI configuration read from the environment.
///
/// Command-line flags take precedence; see [`CliConfig::merge_args`].
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Zone for reference instants and output.
    pub tz: Tz,
    /// Use the 6-field parser.
    pub seconds: bool,
    /// Log filter used when `RUST_LOG` is unset.
    pub log: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            tz: Tz::UTC,
            seconds: false,
            log: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Result<Self> {
        let tz = match env_opt("STUPID_CRON_TZ") {
            Some(name) => parse_tz(&name).context("invalid STUPID_CRON_TZ")?,
            None => Tz::UTC,
        };
        Ok(Self {
            tz,
            seconds: env_opt("STUPID_CRON_SECONDS").is_some_and(|v| parse_flag(&v)),
            log: env_or("STUPID_CRON_LOG", "warn"),
        })
    }

    /// Apply command-line overrides.
    pub fn merge_args(mut self, seconds: bool, tz: Option<&str>) -> Result<Self> {
        if seconds {
            self.seconds = true;
        }
        if let Some(name) = tz {
            self.tz = parse_tz(name).context("invalid --tz")?;
        }
        Ok(self)
    }
}

pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("unknown timezone '{}': {}", name, e))
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
