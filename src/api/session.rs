//! Authenticated HTTP session shared by every scenario step

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::common::{Error, Result};

use super::auth::AuthToken;

/// Status and raw body of one HTTP exchange
///
/// The body is left unparsed; each step decodes it against the contract
/// it expects.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Long-lived client bound to the base URL
///
/// Every request carries `Authorization: Bearer <token>`. The session owns
/// the token for the rest of the run and is released when dropped.
pub struct ClientSession {
    client: reqwest::Client,
    base_url: String,
    requests_sent: usize,
}

impl ClientSession {
    /// Build the session around an already-acquired token
    pub fn new(base_url: &str, token: AuthToken) -> Result<Self> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|e| Error::InvalidToken(e.to_string()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))?;

        tracing::debug!(base_url = %base_url, "client session opened");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            requests_sent: 0,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of requests issued through this session so far
    pub fn requests_sent(&self) -> usize {
        self.requests_sent
    }

    /// Send one request and return its status and raw body
    ///
    /// No retries. A failure to obtain a response is returned as
    /// `Error::Transport`; any HTTP status, including 4xx/5xx, is a
    /// successful exchange.
    pub async fn execute<B>(
        &mut self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method.clone(), &url);
        if let Some(json) = body {
            request = request.json(json);
        }

        self.requests_sent += 1;
        tracing::debug!(method = %method, url = %url, "sending request");

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(method.as_str(), &url, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(method.as_str(), &url, &e))?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received response");

        Ok(RawResponse { status, body })
    }
}

impl Drop for ClientSession {
    fn drop(&mut self) {
        tracing::debug!(
            requests = self.requests_sent,
            "client session released"
        );
    }
}
