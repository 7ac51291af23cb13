use serde::Deserialize;

/// Application settings injected at startup.
///
/// Loaded from `config/*.yaml` with environment overrides; nothing here is
/// read from ambient globals after boot.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub database_url: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Signs session identity tokens; shared with the accounts service.
    pub secret: String,
    #[serde(default = "default_login_url")]
    pub login_url: String,
    pub youtube_api_key: String,
    #[serde(default = "default_youtube_api_base")]
    pub youtube_api_base: String,
    #[serde(default = "default_books_api_base")]
    pub books_api_base: String,
    /// HTTP mail relay endpoint for moderation reports.
    pub mail_relay_url: String,
    pub mail_from: String,
    pub report_recipient: String,
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Loads settings from `config/default.yaml`, an optional
    /// `config/{APP_ENV}.yaml` override and `NOOBHUB_`-prefixed environment
    /// variables, in that order.
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(config::Environment::with_prefix("NOOBHUB"))
            .build()?
            .try_deserialize()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_login_url() -> String {
    "/accounts/login/".to_string()
}

fn default_youtube_api_base() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_books_api_base() -> String {
    "https://www.googleapis.com/books/v1".to_string()
}
