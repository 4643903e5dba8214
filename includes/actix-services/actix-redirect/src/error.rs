//! Error and Result module

use actix_web::ResponseError;
use derive_more::{Display, Error, From};

/// Errors which occur when building or applying redirect rules
#[derive(Debug, Display, From, Error)]
#[non_exhaustive]
pub enum Error {
    #[display("Invalid redirect pattern: {_0}")]
    InvalidRegex(regex_automata::meta::BuildError),

    #[display("Redirect configured with invalid status code")]
    InvalidStatus(actix_http::error::InvalidStatusCode),

    #[display("Malformed redirect entry {_0:?}")]
    MalformedEntry(#[error(not(source))] String),

    #[display("Failed to write redirect response: {_0}")]
    InvalidHeader(actix_http::header::InvalidHeaderValue),
}

impl ResponseError for Error {
    /// Returns `500 Internal Server Error`.
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
    }
}
