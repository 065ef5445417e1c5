use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::{Dictionary, DictionaryError};

/// Default lookup endpoint (Merriam-Webster Collegiate, keyed)
pub const DEFAULT_API_URL: &str = "https://www.dictionaryapi.com/api/v3/references/collegiate/json";

/// Dictionary backed by a keyed HTTP lookup service.
///
/// `GET {base_url}/{word}?key={api_key}`. A hit is a JSON array containing at
/// least one entry object; a miss is an empty array, an array of spelling
/// suggestions (plain strings) or a 404.
#[derive(Clone)]
pub struct HttpDictionary {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpDictionary {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
            api_key: api_key.into(),
        }
    }

    fn word_url(&self, word: &str) -> String {
        format!("{}/{}", self.base_url, word.to_lowercase())
    }
}

#[async_trait]
impl Dictionary for HttpDictionary {
    async fn lookup(&self, word: &str) -> Result<bool, DictionaryError> {
        let response = self
            .http_client
            .get(self.word_url(word))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::warn!("Dictionary returned 404 for {}, treating it as a miss", word);
            return Ok(false);
        }
        if !status.is_success() {
            return Err(DictionaryError::Status(status));
        }

        let body = response.text().await?;
        let found = parse_entries(&body)?;
        tracing::debug!("Dictionary lookup {} -> {}", word, found);
        Ok(found)
    }
}

/// Decide hit/miss from the response body
fn parse_entries(body: &str) -> Result<bool, DictionaryError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| DictionaryError::Parse(e.to_string()))?;

    match value {
        Value::Array(entries) => Ok(entries.iter().any(Value::is_object)),
        other => Err(DictionaryError::Parse(format!(
            "expected a JSON array, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
