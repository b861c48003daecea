use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{ImdbError, Result};

/// A single query-string value: scalar or list.
#[derive(Debug, Clone)]
pub enum Param {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Self::One(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Self::One(v)
    }
}

impl From<u32> for Param {
    fn from(v: u32) -> Self {
        Self::One(v.to_string())
    }
}

impl From<i32> for Param {
    fn from(v: i32) -> Self {
        Self::One(v.to_string())
    }
}

impl From<Vec<String>> for Param {
    fn from(v: Vec<String>) -> Self {
        Self::Many(v)
    }
}

/// HTTP client wrapper for the upstream REST API
#[derive(Clone)]
pub struct ImdbClient {
    client: Client,
    base_url: String,
    host: String,
    api_key: String,
}

impl ImdbClient {
    /// Create a new client against `https://{host}`
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent("Cinegate/0.1.0")
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        let host = host.into();
        Self {
            client,
            base_url: format!("https://{host}"),
            host,
            api_key: api_key.into(),
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Build full URL from endpoint path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Expand params into query pairs. Scalars become one pair; list
    /// values repeat under a `[]`-suffixed key, one pair per element.
    pub(super) fn query_pairs(params: &[(&str, Param)]) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in params {
            match value {
                Param::One(v) => pairs.push(((*key).to_string(), v.clone())),
                Param::Many(vs) => {
                    for v in vs {
                        pairs.push((format!("{key}[]"), v.clone()));
                    }
                }
            }
        }
        pairs
    }

    /// Execute a GET request against the upstream and parse the body.
    ///
    /// An empty body parses as an empty object. A non-empty body that is
    /// not valid JSON fails with `Parse`, keeping the status and raw text
    /// for diagnostics. A non-2xx status fails with `Api`, carrying the
    /// upstream `message` field when present.
    pub async fn call(&self, path: &str, params: &[(&str, Param)]) -> Result<Value> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .query(&Self::query_pairs(params))
            .header("x-rapidapi-host", &self.host)
            .header("x-rapidapi-key", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ImdbError::Network)?;

        let status = response.status();
        let text = response.text().await.map_err(ImdbError::Network)?;

        let json: Value = if text.is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&text).map_err(|_| ImdbError::Parse {
                status: status.as_u16(),
                body: text.clone(),
            })?
        };

        if !status.is_success() {
            let message = json
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| json.to_string(), str::to_string);

            return Err(ImdbError::Api {
                status: status.as_u16(),
                message,
                body: json,
            });
        }

        Ok(json)
    }
}
