//! Authentication bootstrap
//!
//! Exchanges the configured credentials for a bearer token. This happens
//! once per run, on a client that carries no authorization header.

use crate::common::{Error, Result};

use super::types::{LoginRequest, LoginResponse};

/// Path of the login endpoint, relative to the base URL
pub const LOGIN_PATH: &str = "/api/User/Authentication";

/// Username/password pair, both guaranteed non-empty
#[derive(Clone)]
pub struct AuthCredentials {
    username: String,
    password: String,
}

impl AuthCredentials {
    pub fn new(username: String, password: String) -> Result<Self> {
        if username.is_empty() {
            return Err(Error::Config(
                "username is required (--username, STORY_HARNESS_USERNAME or [credentials])"
                    .to_string(),
            ));
        }
        if password.is_empty() {
            return Err(Error::Config(
                "password is required (--password, STORY_HARNESS_PASSWORD or [credentials])"
                    .to_string(),
            ));
        }
        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for AuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer token
#[derive(Clone)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthToken(<{} bytes>)", self.0.len())
    }
}

/// Log in and return the bearer token
///
/// Any status other than 200, or a body without a usable `accessToken`,
/// is fatal for the run.
pub async fn obtain_token(base_url: &str, credentials: &AuthCredentials) -> Result<AuthToken> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), LOGIN_PATH);
    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| Error::ClientBuild(e.to_string()))?;

    tracing::info!(url = %url, user = %credentials.username(), "requesting access token");

    let response = client
        .post(&url)
        .json(&LoginRequest {
            user_name: credentials.username(),
            password: credentials.password(),
        })
        .send()
        .await
        .map_err(|e| Error::transport("POST", &url, &e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::transport("POST", &url, &e))?;

    if status != reqwest::StatusCode::OK {
        return Err(Error::authentication(status.as_u16(), &body));
    }

    let parsed: LoginResponse = serde_json::from_str(&body)
        .map_err(|_| Error::authentication(status.as_u16(), &body))?;

    match parsed.access_token {
        Some(token) if !token.is_empty() => {
            tracing::debug!("access token acquired");
            Ok(AuthToken::new(token))
        }
        _ => Err(Error::MissingToken {
            status: status.as_u16(),
            body,
        }),
    }
}
