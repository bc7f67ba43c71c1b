use std::{sync::Arc, time::Duration};

use twilight_http::Client;

use warden_apis::{
    abuseipdb::AbuseIpDbClient, cloudflare::CloudflareClient, ncmec::MissingKidsClient,
};
use warden_utils::pagination::SessionRegistry;

/// Environment-driven runtime configuration.
pub mod config;

pub use config::Config;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    /// Discord REST client.
    pub http: Arc<Client>,
    /// Client used for third-party API calls.
    pub api: reqwest::Client,
    pub config: Arc<Config>,
    /// Live pagination sessions, keyed by session ID.
    pub sessions: SessionRegistry,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, config: Arc<Config>) -> anyhow::Result<Self> {
        let api = reqwest::Client::builder()
            .user_agent(concat!("warden/", env!("CARGO_PKG_VERSION")))
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api,
            config,
            sessions: SessionRegistry::new(),
        })
    }

    /// AbuseIPDB client, if an API key is configured.
    pub fn abuseipdb(&self) -> Option<AbuseIpDbClient> {
        self.config
            .abuseipdb_api_key
            .as_deref()
            .map(|key| AbuseIpDbClient::new(self.api.clone(), key))
    }

    /// Cloudflare client, if the email/key pair is configured.
    pub fn cloudflare(&self) -> Option<CloudflareClient> {
        self.config
            .cloudflare
            .clone()
            .map(|credentials| CloudflareClient::new(self.api.clone(), credentials))
    }

    pub fn missing_kids(&self) -> MissingKidsClient {
        MissingKidsClient::new(self.api.clone())
    }
}
