use std::sync::Once;

use actix_web::{
    HttpRequest, HttpResponse, Responder,
    body::{self, BoxBody},
    dev::ServiceResponse,
};
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static START: Once = Once::new();

/// Setup function that is only run once, even if called multiple times.
pub fn setup() {
    START.call_once(|| {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");
    });
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub uri: String,
}

/// Downstream handler reporting the request it received
pub async fn echo(req: HttpRequest) -> impl Responder {
    HttpResponse::Ok().json(Echo {
        method: req.method().to_string(),
        path: req.path().to_string(),
        uri: req.uri().to_string(),
    })
}

/// Convert `ServiceResponse` into body content string
pub async fn get_body(res: ServiceResponse<BoxBody>) -> String {
    let content = res.into_body();
    let data = body::to_bytes(content).await.expect("missing body");
    std::str::from_utf8(&data)
        .expect("invalid body")
        .to_string()
}

/// Parse the [`Echo`] produced by the downstream handler
pub async fn get_echo(res: ServiceResponse<BoxBody>) -> Echo {
    let body = get_body(res).await;
    serde_json::from_str(&body).expect("invalid echo body")
}
