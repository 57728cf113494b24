//! Handles settings for the application.
//!
//! Settings are read from an optional `settings.toml` (another path can be
//! given through `SPLITBILL_CONFIG`) and then from `SPLITBILL_*` environment
//! variables, where `__` separates nested keys: `SPLITBILL_SERVER__PORT=8080`.
use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

const CONFIG_PATH_VAR: &str = "SPLITBILL_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "settings";

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    /// Base of the share links handed out after publishing.
    pub public_url: String,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Ocr {
    pub api_key: String,
    #[serde(default = "default_ocr_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_ocr_engine")]
    pub engine: u8,
}

fn default_ocr_endpoint() -> String {
    ocr::DEFAULT_ENDPOINT.to_string()
}

fn default_ocr_engine() -> u8 {
    ocr::DEFAULT_ENGINE
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub ocr: Option<Ocr>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::build(File::with_name(&path).required(false), environment())
    }

    fn build<S>(file: S, env: Environment) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.public_url", "http://127.0.0.1:3000")?
            .set_default("server.database", "memory")?
            .add_source(file)
            .add_source(env)
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SPLITBILL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
