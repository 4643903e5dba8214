use actix_redirect::Engine;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors when loading the hub configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to read configuration file")]
    Io(#[from] std::io::Error),

    #[error("Invalid yaml configuration")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid toml configuration")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported configuration format {0:?}")]
    UnsupportedFormat(String),

    #[error("Redirect hub declares both a regex and a redirect table")]
    AmbiguousRedirect,

    #[error("Redirect hub declares a replacement without a regex")]
    MissingRegex,

    #[error("Invalid redirect rule")]
    Redirect(#[from] actix_redirect::Error),
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Configuration {
    pub network: Option<NetworkConfiguration>,
    pub hubs: Option<ConfigurationHubs>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ConfigurationHubs {
    #[serde(alias = "static")]
    pub _static: Option<StaticHubConfiguration>,
    pub redirect: Option<RedirectHubConfiguration>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct StaticHubConfiguration {
    pub path: Option<String>,
    pub remote_path: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RedirectHubConfiguration {
    pub name: Option<String>,
    #[serde(alias = "pattern")]
    pub regex: Option<String>,
    pub replacement: Option<String>,
    #[serde(alias = "statusCode")]
    pub status_code: Option<u16>,
    pub debug: Option<bool>,
    pub redirects: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct NetworkConfiguration {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl RedirectHubConfiguration {
    /// Compile the configured rules into a redirect [`Engine`].
    ///
    /// Returns `None` when neither a regex nor a redirect table is set.
    pub fn engine(&self) -> Result<Option<Engine>, ConfigurationError> {
        let engine = match (self.regex.as_deref(), self.redirects.as_ref()) {
            (Some(_), Some(_)) => return Err(ConfigurationError::AmbiguousRedirect),
            (Some(regex), None) => Engine::pattern(
                regex,
                self.replacement.as_deref().unwrap_or_default(),
                self.status_code.unwrap_or_default(),
            )?,
            (None, Some(redirects)) => Engine::table(redirects).debug(self.debug.unwrap_or_default()),
            (None, None) if self.replacement.is_some() => {
                return Err(ConfigurationError::MissingRegex);
            }
            (None, None) => return Ok(None),
        };
        Ok(Some(match self.name.as_ref() {
            Some(name) => engine.name(name),
            None => engine,
        }))
    }
}

impl Configuration {
    pub fn redirect(&self) -> Option<&RedirectHubConfiguration> {
        self.hubs.as_ref().and_then(|h| h.redirect.as_ref())
    }
}

/// Parse configuration content using the format implied by `extension`.
pub fn parse_configuration(
    content: &str,
    extension: &str,
) -> Result<Configuration, ConfigurationError> {
    match extension {
        "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
        "toml" => Ok(toml::from_str(content)?),
        ext => Err(ConfigurationError::UnsupportedFormat(ext.to_owned())),
    }
}

pub async fn load_configuration(path: &str) -> Result<Configuration, ConfigurationError> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_lowercase();
    let content = tokio::fs::read_to_string(path).await?;
    parse_configuration(&content, &extension)
}
