use thiserror::Error;

pub const BASE_URL_VAR: &str = "HOMEBOX_BASE_URL";
pub const API_TOKEN_VAR: &str = "HOMEBOX_API_TOKEN";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set and non-blank")]
    MissingVar(&'static str),
}

/// Connection settings for the Homebox backend, loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeboxConfig {
    /// Base URL of the Homebox API, e.g. `https://homebox.example/api`
    pub base_url: String,
    /// Bearer token attached to every request
    pub api_token: String,
}

impl HomeboxConfig {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
        }
    }

    /// Read `HOMEBOX_BASE_URL` and `HOMEBOX_API_TOKEN`, both required
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: require_var(BASE_URL_VAR)?,
            api_token: require_var(API_TOKEN_VAR)?,
        })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
