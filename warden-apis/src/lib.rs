//! Typed clients for the third-party HTTP APIs the bot's plugins wrap.
//!
//! Each client receives its `reqwest::Client` and credentials from the caller;
//! nothing here holds global state.

/// AbuseIPDB IP reputation lookups.
pub mod abuseipdb;
/// Cloudflare zone listing and WHOIS intel.
pub mod cloudflare;
/// MissingKids (NCMEC) public search.
pub mod ncmec;

mod error;

pub use error::ApiError;
pub use reqwest::StatusCode;

/// Read a successful response body, mapping non-2xx statuses to [`ApiError::Status`].
async fn read_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status));
    }

    Ok(response.text().await?)
}
