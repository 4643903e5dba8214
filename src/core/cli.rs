use clap::{Parser, command};

pub const DEFAULT_CONFIGURATION_PATH: &str = "conf.yaml";

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file, `.yaml`/`.yml` or `.toml`
    #[arg(short, long)]
    pub configuration_path: Option<String>,
}

impl Cli {
    pub fn configuration_path(&self) -> &str {
        self.configuration_path
            .as_deref()
            .unwrap_or(DEFAULT_CONFIGURATION_PATH)
    }
}
