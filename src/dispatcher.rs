// Request dispatcher: builds and sends one HTTP request against the
// configured base URL and hands back a ResponseCapture.

use crate::config::ClientConfig;
use crate::model::ResponseCapture;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    // The original suite silently fell back to GET for unknown verbs; an
    // unknown verb is an explicit error here instead.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

// The only verbs the booking API surface uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(DispatchError::UnsupportedMethod(other.to_string())),
        }
    }
}

// Seam between the scenario runner and the transport, so scenarios can run
// against an in-memory service in tests.
#[async_trait]
pub trait RequestDispatcher: Send + Sync + 'static {
    // Sends one request. `path` is relative and joined to the base URL; a
    // JSON body goes out with Content-Type: application/json; a non-empty
    // token is attached as `Cookie: token=<value>` (the service's auth
    // convention, not a bearer header). No retries: transport failures
    // propagate to the caller.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<ResponseCapture, DispatchError>;

    // Base URL the dispatcher targets, for report rendering.
    fn base_url(&self) -> &str;
}

pub struct HttpDispatcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDispatcher {
    pub fn new(config: &ClientConfig) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RequestDispatcher for HttpDispatcher {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<ResponseCapture, DispatchError> {
        let url = format!("{}{}", self.base_url, path);
        let reqwest_method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut request = self.client.request(reqwest_method, &url);
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            request = request.header(reqwest::header::COOKIE, format!("token={token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        tracing::info!(
            method = %method,
            %url,
            status,
            body = %body,
            "dispatched request"
        );

        Ok(ResponseCapture {
            status,
            content_type,
            body,
        })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
