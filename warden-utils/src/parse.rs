use std::net::IpAddr;

use url::{Host, Url};

/// Parse an IPv4 or IPv6 address argument.
///
/// Surrounding backticks or angle brackets (as left by Discord formatting) are ignored.
pub fn parse_ip_address(raw: &str) -> Option<IpAddr> {
    strip_wrappers(raw).parse().ok()
}

/// Normalise a domain argument into a bare, lowercase ASCII host name.
///
/// Accepts pasted URLs (scheme, port, path and trailing dot are dropped) and
/// internationalised names, which come back punycoded. Arguments carrying
/// credentials, such as e-mail addresses, are rejected.
pub fn parse_domain(raw: &str) -> Option<String> {
    let value = strip_wrappers(raw);
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return None;
    }

    let url = if value.contains("://") {
        Url::parse(value)
    } else {
        Url::parse(&format!("http://{value}"))
    }
    .ok()?;

    if !url.username().is_empty() || url.password().is_some() {
        return None;
    }

    let Some(Host::Domain(domain)) = url.host() else {
        return None;
    };
    let host = domain.trim_end_matches('.').to_ascii_lowercase();

    let valid_label = |label: &str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
    };

    if host.len() > 253 || !host.contains('.') || !host.split('.').all(valid_label) {
        return None;
    }

    Some(host)
}

fn strip_wrappers(raw: &str) -> &str {
    raw.trim().trim_matches(|ch| matches!(ch, '`' | '<' | '>'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ip_addresses() {
        assert_eq!(
            parse_ip_address("1.2.3.4"),
            Some("1.2.3.4".parse().unwrap())
        );
        assert_eq!(
            parse_ip_address("`2001:db8::1`"),
            Some("2001:db8::1".parse().unwrap())
        );
        assert_eq!(parse_ip_address("300.1.1.1"), None);
        assert_eq!(parse_ip_address("example.com"), None);
    }

    #[test]
    fn normalises_domains() {
        assert_eq!(parse_domain("Example.COM").as_deref(), Some("example.com"));
        assert_eq!(
            parse_domain("<https://sub.example.org:8443/path?q=1>").as_deref(),
            Some("sub.example.org")
        );
        assert_eq!(
            parse_domain("example.net/whois#top").as_deref(),
            Some("example.net")
        );
        assert_eq!(parse_domain("example.com.").as_deref(), Some("example.com"));
    }

    #[test]
    fn rejects_invalid_domains() {
        for raw in [
            "localhost",
            "",
            "bad_domain.com",
            "-lead.example",
            "a..b",
            "exa mple.com",
            "1.2.3.4",
        ] {
            assert_eq!(parse_domain(raw), None, "{raw}");
        }
    }

    #[test]
    fn internationalised_domains_are_punycoded() {
        assert_eq!(
            parse_domain("bücher.de").as_deref(),
            Some("xn--bcher-kva.de")
        );
        assert_eq!(
            parse_domain("https://Bücher.DE/").as_deref(),
            Some("xn--bcher-kva.de")
        );
    }

    #[test]
    fn credentials_are_not_domains() {
        assert_eq!(parse_domain("ops@example.com"), None);
        assert_eq!(parse_domain("https://user:pw@example.com/"), None);
    }
}
