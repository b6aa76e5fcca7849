use reqwest::{header::CONTENT_TYPE, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{ClientError, Result},
    session::SessionStore,
};

#[derive(Debug, Clone)]
pub struct RequestOptions {
    method: Method,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// JSON client bound to one service base URL. Every request carries the
/// current session's credentials when one is stored.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl HttpClient {
    pub fn new(inner: reqwest::Client, base_url: &str, session: SessionStore) -> Self {
        Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self
            .inner
            .request(options.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(session) = self.session.get() {
            builder = builder
                .header("X-User-Email", session.email.as_str())
                .bearer_auth(&session.token);
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %options.method, %url, "sending request");
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(status, &text);
            tracing::warn!(%url, status = status.as_u16(), %message, "request failed");
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn request_as<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let value = self.request(path, options).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// `detail` wins, then `message`, then the status line.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    )
    .trim_end()
    .to_string();

    let Ok(parsed) = serde_json::from_str::<Value>(body) else {
        return fallback;
    };
    ["detail", "message"]
        .iter()
        .find_map(|key| match parsed.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(Value::String(_)) => None,
            Some(other) => Some(other.to_string()),
        })
        .unwrap_or(fallback)
}
