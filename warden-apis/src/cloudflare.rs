use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{ApiError, read_body};

const API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Largest page size the zone listing accepts.
const ZONES_PER_PAGE: u32 = 50;
/// Upper bound on listing requests for one command.
const MAX_ZONE_PAGES: u32 = 20;

/// Credentials for the Cloudflare v4 API.
///
/// Zone listing only needs the global key pair; WHOIS intel also needs a bearer
/// token and the account ID.
#[derive(Clone, Debug, Default)]
pub struct CloudflareCredentials {
    pub email: String,
    pub api_key: String,
    pub bearer_token: Option<String>,
    pub account_id: Option<String>,
}

/// A zone (domain) on the account.
#[derive(Clone, Debug, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Raw WHOIS record. Keys vary per registry, so it stays an untyped map.
pub type WhoisRecord = Map<String, Value>;

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<EnvelopeMessage>,
    result: Option<T>,
    #[serde(default)]
    result_info: Option<ResultInfo>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
struct ResultInfo {
    #[serde(default)]
    total_pages: u32,
}

#[derive(Deserialize)]
struct EnvelopeMessage {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

impl<T> Envelope<T> {
    fn total_pages(&self) -> u32 {
        self.result_info.map_or(1, |info| info.total_pages.max(1))
    }

    fn into_result(self) -> Result<Option<T>, ApiError> {
        if !self.success {
            let detail = self
                .errors
                .iter()
                .map(|error| format!("{} ({})", error.message, error.code))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ApiError::Unsuccessful(detail));
        }

        Ok(self.result)
    }
}

/// One page of a zone listing.
#[derive(Debug, Default)]
pub struct ZonePage {
    pub zones: Vec<Zone>,
    /// Pages available upstream, at least 1.
    pub total_pages: u32,
}

/// Parse the body of a zone listing.
pub fn parse_zones(body: &str) -> Result<ZonePage, ApiError> {
    let envelope: Envelope<Vec<Zone>> = serde_json::from_str(body)?;
    let total_pages = envelope.total_pages();

    Ok(ZonePage {
        zones: envelope.into_result()?.unwrap_or_default(),
        total_pages,
    })
}

/// Parse the body of a WHOIS lookup.
pub fn parse_whois(body: &str) -> Result<WhoisRecord, ApiError> {
    let envelope: Envelope<WhoisRecord> = serde_json::from_str(body)?;
    Ok(envelope.into_result()?.unwrap_or_default())
}

/// Page to request after `page`, if any remain within `MAX_ZONE_PAGES`.
fn next_zone_page(page: u32, total_pages: u32) -> Option<u32> {
    if page >= total_pages {
        return None;
    }
    if page >= MAX_ZONE_PAGES {
        warn!(total_pages, "zone listing truncated at {MAX_ZONE_PAGES} pages");
        return None;
    }
    Some(page + 1)
}

/// Cloudflare v4 client.
#[derive(Clone)]
pub struct CloudflareClient {
    http: reqwest::Client,
    credentials: CloudflareCredentials,
}

impl CloudflareClient {
    pub fn new(http: reqwest::Client, credentials: CloudflareCredentials) -> Self {
        Self { http, credentials }
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Auth-Email", &self.credentials.email)
            .header("X-Auth-Key", &self.credentials.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    /// List the zones visible to the configured account, following every
    /// listing page up to `MAX_ZONE_PAGES`.
    pub async fn zones(&self) -> Result<Vec<Zone>, ApiError> {
        let mut zones = Vec::new();
        let mut page = 1;

        loop {
            let listing = self.zone_page(page).await?;
            zones.extend(listing.zones);

            match next_zone_page(page, listing.total_pages) {
                Some(next) => page = next,
                None => break,
            }
        }

        Ok(zones)
    }

    async fn zone_page(&self, page: u32) -> Result<ZonePage, ApiError> {
        debug!(page, "listing Cloudflare zones");

        let response = self
            .authed(self.http.get(format!("{API_BASE}/zones")))
            .query(&[("per_page", ZONES_PER_PAGE), ("page", page)])
            .send()
            .await?;

        parse_zones(&read_body(response).await?)
    }

    /// Fetch WHOIS intel for `domain`.
    pub async fn whois(&self, domain: &str) -> Result<WhoisRecord, ApiError> {
        let bearer_token = self
            .credentials
            .bearer_token
            .as_deref()
            .ok_or(ApiError::MissingCredentials("Cloudflare bearer token"))?;
        let account_id = self
            .credentials
            .account_id
            .as_deref()
            .ok_or(ApiError::MissingCredentials("Cloudflare account ID"))?;

        debug!(domain, "querying Cloudflare WHOIS intel");

        let response = self
            .authed(
                self.http
                    .get(format!("{API_BASE}/accounts/{account_id}/intel/whois")),
            )
            .bearer_auth(bearer_token)
            .query(&[("domain", domain)])
            .send()
            .await?;

        parse_whois(&read_body(response).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zone_listing() {
        let body = r#"{
            "success": true,
            "errors": [],
            "messages": [],
            "result": [
                {"id": "023e105f4ecef8ad9ca31a8372d0c353", "name": "example.com", "status": "active"},
                {"id": "9a7806061c88ada191ed06f989cc3dac", "name": "example.org"}
            ]
        }"#;

        let listing = parse_zones(body).unwrap();
        let names: Vec<&str> = listing.zones.iter().map(|zone| zone.name.as_str()).collect();
        assert_eq!(names, vec!["example.com", "example.org"]);
        assert_eq!(listing.zones[1].status, None);
        assert_eq!(listing.total_pages, 1);
    }

    #[test]
    fn zone_listing_reports_remaining_pages() {
        let body = r#"{
            "success": true,
            "errors": [],
            "result": [{"id": "1", "name": "zone1.example"}],
            "result_info": {"page": 1, "per_page": 50, "count": 50, "total_count": 120, "total_pages": 3}
        }"#;

        assert_eq!(parse_zones(body).unwrap().total_pages, 3);
    }

    #[test]
    fn zone_pages_are_followed_up_to_the_cap() {
        assert_eq!(next_zone_page(1, 1), None);
        assert_eq!(next_zone_page(1, 3), Some(2));
        assert_eq!(next_zone_page(3, 3), None);
        assert_eq!(next_zone_page(MAX_ZONE_PAGES, MAX_ZONE_PAGES + 5), None);
    }

    #[test]
    fn missing_result_is_empty() {
        let body = r#"{"success": true, "errors": [], "result": null}"#;
        let listing = parse_zones(body).unwrap();
        assert!(listing.zones.is_empty());
        assert_eq!(listing.total_pages, 1);
    }

    #[test]
    fn unsuccessful_envelope_is_an_error() {
        let body = r#"{"success": false, "errors": [{"code": 10000, "message": "Authentication error"}], "result": null}"#;

        match parse_whois(body) {
            Err(ApiError::Unsuccessful(detail)) => {
                assert_eq!(detail, "Authentication error (10000)");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn whois_keeps_unknown_keys() {
        let body = r#"{"success": true, "errors": [], "result": {
            "domain": "example.com",
            "nameservers": ["a.iana-servers.net", "b.iana-servers.net"],
            "registrar": "RESERVED-Internet Assigned Numbers Authority",
            "some_future_field": 1
        }}"#;

        let record = parse_whois(body).unwrap();
        assert_eq!(record["domain"], "example.com");
        assert_eq!(record["nameservers"].as_array().map(Vec::len), Some(2));
        assert!(record.contains_key("some_future_field"));
    }

    #[tokio::test]
    async fn whois_requires_bearer_and_account() {
        let client = CloudflareClient::new(
            reqwest::Client::new(),
            CloudflareCredentials {
                email: "ops@example.com".to_owned(),
                api_key: "key".to_owned(),
                ..CloudflareCredentials::default()
            },
        );

        assert!(matches!(
            client.whois("example.com").await,
            Err(ApiError::MissingCredentials(_))
        ));
    }
}
