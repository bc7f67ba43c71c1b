use std::{env, str::FromStr, time::Duration};

use anyhow::Context as _;

use warden_apis::cloudflare::CloudflareCredentials;
use warden_utils::pagination::DEFAULT_TIMEOUT_SECS;

const DEFAULT_STATUS_ROTATION_SECS: u64 = 120;

/// Runtime configuration, read once at startup.
///
/// API credentials are optional: commands whose credentials are missing
/// answer with a short notice instead of failing.
#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    /// User allowed to run owner-only commands in any guild.
    pub owner_id: Option<u64>,
    pub abuseipdb_api_key: Option<String>,
    /// Present when both `CLOUDFLARE_EMAIL` and `CLOUDFLARE_API_KEY` are set.
    pub cloudflare: Option<CloudflareCredentials>,
    pub pagination_timeout: Duration,
    pub status_rotation_interval: Duration,
}

impl Config {
    /// Load the `.env` file (if any) and read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let discord_token = read("DISCORD_TOKEN").context("DISCORD_TOKEN must be set")?;

        let cloudflare = match (read("CLOUDFLARE_EMAIL"), read("CLOUDFLARE_API_KEY")) {
            (Some(email), Some(api_key)) => Some(CloudflareCredentials {
                email,
                api_key,
                bearer_token: read("CLOUDFLARE_BEARER_TOKEN"),
                account_id: read("CLOUDFLARE_ACCOUNT_ID"),
            }),
            _ => None,
        };

        let pagination_timeout_secs = parse_or(
            "PAGINATION_TIMEOUT_SECS",
            read("PAGINATION_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        )?;
        let status_rotation_secs = parse_or(
            "STATUS_ROTATION_SECS",
            read("STATUS_ROTATION_SECS"),
            DEFAULT_STATUS_ROTATION_SECS,
        )?;

        if pagination_timeout_secs == 0 || status_rotation_secs == 0 {
            anyhow::bail!("PAGINATION_TIMEOUT_SECS and STATUS_ROTATION_SECS must be positive");
        }

        Ok(Self {
            discord_token,
            owner_id: read("BOT_OWNER_ID")
                .map(|raw| raw.parse::<u64>())
                .transpose()
                .context("BOT_OWNER_ID must be a Discord user ID")?,
            abuseipdb_api_key: read("ABUSEIPDB_API_KEY"),
            cloudflare,
            pagination_timeout: Duration::from_secs(pagination_timeout_secs),
            status_rotation_interval: Duration::from_secs(status_rotation_secs),
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .parse()
            .with_context(|| format!("{key} must be a number, got `{value}`")),
        None => Ok(default),
    }
}
