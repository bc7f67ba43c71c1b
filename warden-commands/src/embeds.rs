use warden_apis::ApiError;

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{usage}`")
}

pub fn permission_denied_message() -> &'static str {
    "You are not permitted to use this command."
}

/// Notice for a plugin whose credentials are not configured.
pub fn missing_credentials_message(service: &str, variables: &str) -> String {
    format!("{service} credentials are not set. Ask the bot owner to configure {variables}.")
}

/// Notice for a failed upstream fetch, including the HTTP status when known.
pub fn fetch_failed_message(what: &str, error: &ApiError) -> String {
    match error.status() {
        Some(status) => format!("Failed to fetch {what}: {}", status.as_u16()),
        None => format!("Failed to fetch {what}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failure_mentions_status() {
        let error = ApiError::Status(reqwest_status(403));
        assert_eq!(
            fetch_failed_message("zones", &error),
            "Failed to fetch zones: 403"
        );

        let error = ApiError::Unsuccessful("Authentication error (10000)".to_owned());
        assert_eq!(
            fetch_failed_message("WHOIS information", &error),
            "Failed to fetch WHOIS information."
        );
    }

    fn reqwest_status(code: u16) -> warden_apis::StatusCode {
        warden_apis::StatusCode::from_u16(code).unwrap()
    }
}
