use anyhow::{Context, Result};
use std::env;

const DEFAULT_HOST: &str = "imdb236.p.rapidapi.com";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Process configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Upstream RapidAPI host
    pub rapidapi_host: String,
    /// RapidAPI credential, required
    pub rapidapi_key: String,
    /// Address the HTTP server binds to
    pub bind_addr: String,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Fails when `RAPIDAPI_KEY` is unset so a misconfigured process
    /// never reaches the point of serving requests.
    pub fn from_env() -> Result<Self> {
        let rapidapi_host =
            env::var("RAPIDAPI_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let rapidapi_key = env::var("RAPIDAPI_KEY")
            .context("RAPIDAPI_KEY must be set in the environment")?;
        let bind_addr = env::var("CINEGATE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

        Ok(Self {
            rapidapi_host,
            rapidapi_key,
            bind_addr,
        })
    }
}
