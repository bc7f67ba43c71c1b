use std::net::IpAddr;

use serde::Deserialize;
use tracing::debug;

use crate::{ApiError, read_body};

const CHECK_URL: &str = "https://api.abuseipdb.com/api/v2/check";

/// Reputation report for a single IP address.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpReport {
    pub ip_address: String,
    #[serde(default)]
    pub abuse_confidence_score: u8,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub isp: Option<String>,
    pub domain: Option<String>,
    #[serde(default)]
    pub total_reports: u64,
    pub last_reported_at: Option<String>,
    /// Individual reports, newest first. Only present for verbose checks.
    #[serde(default)]
    pub reports: Vec<AbuseReport>,
}

/// One abuse report filed against an address.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbuseReport {
    pub reported_at: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Deserialize)]
struct CheckEnvelope {
    data: IpReport,
}

/// Parse the body of a `/check` response.
pub fn parse_check(body: &str) -> Result<IpReport, ApiError> {
    Ok(serde_json::from_str::<CheckEnvelope>(body)?.data)
}

/// AbuseIPDB v2 client bound to one API key.
#[derive(Clone)]
pub struct AbuseIpDbClient {
    http: reqwest::Client,
    api_key: String,
}

impl AbuseIpDbClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
        }
    }

    /// Look up an address, including its individual reports.
    pub async fn check(&self, ip: IpAddr) -> Result<IpReport, ApiError> {
        debug!(%ip, "querying AbuseIPDB");

        let response = self
            .http
            .get(CHECK_URL)
            .header("Key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("ipAddress", ip.to_string()), ("verbose", String::new())])
            .send()
            .await?;

        parse_check(&read_body(response).await?)
    }
}
