//! Redirect response construction

use actix_http::{Method, StatusCode, header::HeaderValue};
use actix_web::{
    HttpResponse,
    http::header::{self, ContentType},
};

use super::error::Error;
use super::redirect::Redirect;

pub const X_MIDDLEWARE_NAME: &str = "X-Middleware-Name";
pub const X_MIDDLEWARE_SOURCE: &str = "X-Middleware-Source";
pub const X_MIDDLEWARE_DESTINATION: &str = "X-Middleware-Destination";
pub const X_MIDDLEWARE_STATUS_CODE: &str = "X-Middleware-StatusCode";
pub const X_MIDDLEWARE_OLD_URL: &str = "X-Middleware-Old-URL";

/// Resolve the final redirect status for a request method.
///
/// Unset statuses become `302 Found`, or `307 Temporary Redirect` for
/// anything but GET. A `301` on a non-GET request becomes `308` so the
/// method and body are kept.
pub fn resolve_status(method: &Method, status: Option<StatusCode>) -> StatusCode {
    let get = method == Method::GET;
    let status = status.unwrap_or(match get {
        true => StatusCode::FOUND,
        false => StatusCode::TEMPORARY_REDIRECT,
    });
    match !get && status == StatusCode::MOVED_PERMANENTLY {
        true => StatusCode::PERMANENT_REDIRECT,
        false => status,
    }
}

/// Build the complete redirect response.
///
/// Debug headers are written before `Location` when the redirect
/// carries a [`Trace`](crate::Trace).
pub fn redirect_response(
    name: &str,
    method: &Method,
    redirect: &Redirect,
) -> Result<HttpResponse, Error> {
    let status = resolve_status(method, redirect.status);
    let mut res = HttpResponse::build(status);

    if let Some(trace) = redirect.trace.as_ref() {
        let code = trace.status.map(|sc| sc.as_u16()).unwrap_or_default();
        res.insert_header((X_MIDDLEWARE_NAME, HeaderValue::from_str(name)?))
            .insert_header((X_MIDDLEWARE_SOURCE, HeaderValue::from_str(&trace.source)?))
            .insert_header((
                X_MIDDLEWARE_DESTINATION,
                HeaderValue::from_str(&trace.destination)?,
            ))
            .insert_header((X_MIDDLEWARE_STATUS_CODE, HeaderValue::from(code)))
            .insert_header((X_MIDDLEWARE_OLD_URL, HeaderValue::from_str(&trace.old_url)?));
    }

    let location = HeaderValue::from_str(&redirect.location)?;
    Ok(res
        .insert_header((header::LOCATION, location))
        .content_type(ContentType::plaintext())
        .body(status.canonical_reason().unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_unset() {
        assert_eq!(resolve_status(&Method::GET, None), StatusCode::FOUND);
        assert_eq!(
            resolve_status(&Method::POST, None),
            StatusCode::TEMPORARY_REDIRECT
        );
        assert_eq!(
            resolve_status(&Method::HEAD, None),
            StatusCode::TEMPORARY_REDIRECT
        );
    }

    #[test]
    fn test_resolve_permanent() {
        let moved = Some(StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resolve_status(&Method::GET, moved), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            resolve_status(&Method::POST, moved),
            StatusCode::PERMANENT_REDIRECT
        );
    }

    #[test]
    fn test_resolve_explicit() {
        let found = Some(StatusCode::FOUND);
        assert_eq!(resolve_status(&Method::POST, found), StatusCode::FOUND);
        let not_found = Some(StatusCode::NOT_FOUND);
        assert_eq!(resolve_status(&Method::GET, not_found), StatusCode::NOT_FOUND);
        assert_eq!(resolve_status(&Method::PUT, not_found), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_response_body() {
        let redirect = Redirect::new("/new", None);
        let res = redirect_response("redirect", &Method::POST, &redirect).unwrap();
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/new");
    }

    #[test]
    fn test_response_invalid_header() {
        let redirect = Redirect::new("/new", None).trace(crate::Trace {
            source: "/old".to_owned(),
            destination: "/new".to_owned(),
            status: None,
            old_url: "/old".to_owned(),
        });
        let err = redirect_response("bad\nname", &Method::GET, &redirect).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }
}
