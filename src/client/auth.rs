//! Token sources for authenticating against the state API.
//!
//! The state API is deployed as an authenticated cloud function, which accepts
//! identity tokens rather than access tokens. The credential used on the wire is
//! therefore the `id_token` extra claim of the token, sent with the token's own
//! scheme.

use crate::error::StateError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::debug;

/// Scope requested for every token.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Extra claim holding the identity token.
pub const ID_TOKEN_CLAIM: &str = "id_token";

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
const GCLOUD_CONFIG_ENV: &str = "CLOUDSDK_CONFIG";
const ADC_FILE_NAME: &str = "application_default_credentials.json";

/// An OAuth-style token with its extra claims.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Token {
    pub token_type: String,
    pub access_token: String,
    pub extra: Map<String, Value>,
}

impl Token {
    /// Identity token carried in the extra claims, if any.
    pub fn id_token(&self) -> Option<&str> {
        self.extra
            .get(ID_TOKEN_CLAIM)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Scheme to send with the credential; `Bearer` when the token declares none.
    pub fn scheme(&self) -> &str {
        if self.token_type.is_empty() {
            "Bearer"
        } else {
            &self.token_type
        }
    }

    /// `Authorization` header value built from the identity token.
    pub fn authorization(&self) -> Result<String, StateError> {
        let id_token = self.id_token().ok_or_else(|| {
            StateError::Auth(format!(
                "Token does not carry an `{}` claim; run `gcloud auth application-default login`",
                ID_TOKEN_CLAIM
            ))
        })?;
        Ok(format!("{} {}", self.scheme(), id_token))
    }
}

/// Yields tokens for the state API.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Result<Token, StateError>;
}

/// A fixed token; used when a credential is obtained out of band.
pub struct StaticTokenSource {
    token: Token,
}

impl StaticTokenSource {
    pub fn new(token: Token) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Result<Token, StateError> {
        Ok(self.token.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AuthorizedUser {
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

/// Application Default Credentials token source.
///
/// Supports `authorized_user` credentials (what `gcloud auth application-default
/// login` writes), whose refresh exchange returns an identity token. Credentials
/// are located and read when a token is requested, so a missing file surfaces as
/// an error of the command that needed it.
pub struct AdcTokenSource {
    credentials_path: Option<PathBuf>,
    scopes: Vec<String>,
}

impl AdcTokenSource {
    /// Token source for `scopes` using the default credentials lookup.
    pub fn new(scopes: &[&str]) -> Self {
        Self {
            credentials_path: None,
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Use an explicit credentials file instead of the default lookup.
    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    fn load_credentials(&self) -> Result<AuthorizedUser, StateError> {
        let path = self
            .credentials_path
            .clone()
            .or_else(default_credentials_path)
            .ok_or_else(|| {
                StateError::Auth(
                    "Failed to create new token source: could not find default credentials"
                        .to_string(),
                )
            })?;
        let content = std::fs::read_to_string(&path).map_err(|e| {
            StateError::Auth(format!(
                "Failed to create new token source: cannot read {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!(path = %path.display(), "Loaded application default credentials");
        parse_credentials(&content)
    }
}

#[async_trait]
impl TokenSource for AdcTokenSource {
    async fn token(&self) -> Result<Token, StateError> {
        let credentials = self.load_credentials()?;
        let client = Client::builder().build().map_err(|e| {
            StateError::Auth(format!("Failed to create new token source: {}", e))
        })?;

        debug!(scopes = ?self.scopes, "Refreshing user credentials");
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("refresh_token", credentials.refresh_token.as_str()),
        ];
        let response = client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|e| StateError::Auth(format!("Failed to get token: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StateError::Auth(format!(
                "Failed to get token: {} {}",
                status,
                detail.trim()
            )));
        }

        let body: Map<String, Value> = response
            .json()
            .await
            .map_err(|e| StateError::Auth(format!("Failed to get token: {}", e)))?;
        Ok(token_from_response(body))
    }
}

fn parse_credentials(content: &str) -> Result<AuthorizedUser, StateError> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| StateError::Auth(format!("Malformed credentials file: {}", e)))?;
    let kind = document
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    if kind != "authorized_user" {
        return Err(StateError::Auth(format!(
            "Credentials of type `{}` do not yield an identity token; \
             run `gcloud auth application-default login`",
            kind
        )));
    }
    serde_json::from_value(document)
        .map_err(|e| StateError::Auth(format!("Malformed credentials file: {}", e)))
}

fn token_from_response(body: Map<String, Value>) -> Token {
    let field = |key: &str| {
        body.get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    };
    let token_type = field("token_type");
    let access_token = field("access_token");
    Token {
        token_type,
        access_token,
        extra: body,
    }
}

fn default_credentials_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CREDENTIALS_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    let gcloud_dir = match std::env::var(GCLOUD_CONFIG_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => gcloud_config_dir()?,
    };
    let path = gcloud_dir.join(ADC_FILE_NAME);
    path.exists().then_some(path)
}

#[cfg(windows)]
fn gcloud_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.config_dir().join("gcloud"))
}

#[cfg(not(windows))]
fn gcloud_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".config").join("gcloud"))
}
