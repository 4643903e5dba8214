//! Canonical request url reconstruction

use ::url::{ParseError, Position, Url};
use once_cell::sync::Lazy;
use regex_automata::meta::Regex;

const SCHEME_HTTP: &str = "http";
const SCHEME_HTTPS: &str = "https";

static ABSOLUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?)://(\[[0-9A-Za-z_:.]+\]|[0-9A-Za-z_.\-]+)?(:[0-9]+)?(.*)$").unwrap()
});

static BASE: Lazy<Url> = Lazy::new(|| Url::parse("http://localhost/").unwrap());

/// Parse an absolute url or a relative reference such as `../up` or
/// `?page=2`.
#[inline]
pub fn parse_reference(location: &str) -> Result<Url, ParseError> {
    BASE.join(location)
}

/// Path and query of `url`, in the form sent on a request line.
pub fn request_target(url: &Url) -> &str {
    match &url[Position::BeforePath..Position::AfterQuery] {
        "" => "/",
        target => target,
    }
}

/// Build the absolute `scheme://host[:port]path[?query]` form of a request.
///
/// A scheme-qualified `target` supplies its own scheme, host and port,
/// with the host header only used when the target omits a host. A TLS
/// connection always forces the `https` scheme. The result is not
/// validated.
pub fn canonical_url(target: &str, host: &str, tls: bool) -> String {
    let mut scheme = SCHEME_HTTP;
    let mut host = host;
    let mut port = "";
    let mut rest = target;

    let mut caps = ABSOLUTE.create_captures();
    ABSOLUTE.captures(target, &mut caps);
    if caps.is_match() {
        let group = |index| caps.get_group(index).map(|span| &target[span]);
        scheme = group(1).unwrap_or(SCHEME_HTTP);
        if let Some(h) = group(2).filter(|h| !h.is_empty()) {
            host = h;
        }
        if let Some(p) = group(3) {
            port = p;
        }
        rest = group(4).unwrap_or_default();
    }

    if tls {
        scheme = SCHEME_HTTPS;
    }
    [scheme, "://", host, port, rest].concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_target() {
        assert_eq!(
            canonical_url("/a/b?c=d", "example.com:8080", false),
            "http://example.com:8080/a/b?c=d"
        );
        assert_eq!(canonical_url("/", "example.com", true), "https://example.com/");
    }

    #[test]
    fn test_absolute_target() {
        assert_eq!(
            canonical_url("https://other.org:9000/x?y", "example.com", false),
            "https://other.org:9000/x?y"
        );
        assert_eq!(
            canonical_url("http://[::1]:81/v6", "example.com", false),
            "http://[::1]:81/v6"
        );
    }

    #[test]
    fn test_absolute_without_host() {
        assert_eq!(
            canonical_url("http://:8443/path", "example.com", false),
            "http://example.com:8443/path"
        );
    }

    #[test]
    fn test_parse_reference() {
        for location in [
            "new/path",
            "?page=2",
            "../up",
            "/docs#intro",
            "mailto:a@b.c",
            "https://example.com:8443/x?y#z",
        ] {
            assert!(parse_reference(location).is_ok(), "{location}");
        }
        assert!(parse_reference("http://bad host/").is_err());
        assert!(parse_reference("http://[::1/").is_err());
    }

    #[test]
    fn test_request_target() {
        let url = Url::parse("http://localhost:8080/a/b?c=d#e").unwrap();
        assert_eq!(request_target(&url), "/a/b?c=d");
        let url = Url::parse("https://localhost").unwrap();
        assert_eq!(request_target(&url), "/");
    }

    #[test]
    fn test_tls_overrides_scheme() {
        assert_eq!(
            canonical_url("http://other.org/x", "example.com", true),
            "https://other.org/x"
        );
    }
}
