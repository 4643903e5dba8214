//! Utilities for reading redirect inputs from Actix-Web requests

use actix_web::{HttpRequest, http::header};

use super::redirect::RequestView;

/// Host the request was sent to.
///
/// Prefers the `Host` header and falls back on the request uri authority.
pub fn request_host(req: &HttpRequest) -> &str {
    req.headers()
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .or_else(|| req.uri().authority().map(|auth| auth.as_str()))
        .unwrap_or_default()
}

/// Build a [`RequestView`] using [`HttpRequest`] data and the raw
/// request target.
pub fn request_view<'a>(req: &'a HttpRequest, target: &'a str) -> RequestView<'a> {
    RequestView {
        method: req.method(),
        host: request_host(req),
        tls: req.app_config().secure(),
        target,
    }
}
