use actix_files::Files;
use actix_redirect::Engine;
use actix_web::{App, HttpServer, web};

use crate::core::configuration::Configuration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_STATIC_PATH: &str = "/var/www/html/";
const DEFAULT_DOCUMENT: &str = "index.html";
const DEFAULT_REMOTE_PATH: &str = "/";

pub struct HttpAdapter<'a> {
    configuration: &'a Configuration,
}

impl<'a> HttpAdapter<'a> {
    pub fn new(configuration: &'a Configuration) -> Self {
        Self { configuration }
    }

    /// Compile the redirect rules declared by the configuration.
    pub fn engine(&self) -> std::io::Result<Option<Engine>> {
        let Some(redirect) = self.configuration.redirect() else {
            return Ok(None);
        };
        redirect.engine().map_err(|err| {
            tracing::error!("failed to build redirect rules: {err}");
            std::io::Error::other(err)
        })
    }

    pub async fn run(&self) -> Result<(), std::io::Error> {
        let engine = match self.engine()? {
            Some(engine) => {
                tracing::info!("redirect rules enabled: {:?}", engine.rules());
                engine
            }
            None => {
                tracing::info!("no redirect rules configured");
                Engine::table(Vec::<String>::new())
            }
        };

        let host = self
            .configuration
            .network
            .as_ref()
            .and_then(|f| f.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = self
            .configuration
            .network
            .as_ref()
            .and_then(|f| f.port)
            .unwrap_or(DEFAULT_PORT);

        let static_path = self
            .configuration
            .hubs
            .as_ref()
            .and_then(|h| h._static.as_ref())
            .and_then(|s| s.path.clone())
            .unwrap_or_else(|| DEFAULT_STATIC_PATH.to_string());

        let remote_path = self
            .configuration
            .hubs
            .as_ref()
            .and_then(|h| h._static.as_ref())
            .and_then(|c| c.remote_path.clone())
            .unwrap_or_else(|| DEFAULT_REMOTE_PATH.to_string());

        tracing::info!("serving {static_path:?} at {remote_path:?} on {host}:{port}");
        HttpServer::new(move || {
            App::new()
                .wrap(engine.clone().middleware())
                .configure(|cfg: &mut web::ServiceConfig| config(cfg, &remote_path, &static_path))
        })
        .bind(format!("{host}:{port}"))?
        .run()
        .await
    }
}

fn config(cfg: &mut web::ServiceConfig, remote_path: &str, static_path: &str) {
    cfg.service(
        Files::new(remote_path, static_path)
            .index_file(DEFAULT_DOCUMENT)
            .use_last_modified(true)
            .prefer_utf8(true),
    );
}
