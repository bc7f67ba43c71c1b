use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::{ApiError, read_body};

const PUBLIC_SEARCH_URL: &str =
    "https://api.missingkids.org/missingkids/servlet/JSONDataServlet?action=publicSearch";

/// A missing child record from the public search feed.
///
/// The feed mixes strings and numbers for the same keys, so every field is
/// read leniently into an optional string.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPerson {
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub missing_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub missing_city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub missing_state: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub case_number: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    persons: Vec<MissingPerson>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text).filter(|text| !text.trim().is_empty()),
        Some(other) => Some(other.to_string()),
    })
}

/// Parse a public search response body.
///
/// The endpoint does not always label its JSON correctly, so the body is
/// parsed regardless of the declared content type.
pub fn parse_persons(body: &str) -> Result<Vec<MissingPerson>, ApiError> {
    Ok(serde_json::from_str::<SearchResponse>(body)?.persons)
}

/// Client for the MissingKids public search.
#[derive(Clone)]
pub struct MissingKidsClient {
    http: reqwest::Client,
}

impl MissingKidsClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Recently reported missing children, in feed order.
    pub async fn recent(&self) -> Result<Vec<MissingPerson>, ApiError> {
        debug!("querying MissingKids public search");

        let response = self
            .http
            .get(PUBLIC_SEARCH_URL)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        parse_persons(&read_body(response).await?)
    }
}
