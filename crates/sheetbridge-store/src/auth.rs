//! OAuth client secret and cached token handling.
//!
//! Credentials are loaded once when the store connects. The cached token is
//! refreshed through the token endpoint shortly before it expires, and each
//! refreshed token is written back to the token file so later runs reuse it.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, StoreError};
use crate::wire::TokenResponse;

/// Scopes requested for the consent flow
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive.file",
];

/// Tokens expiring within this window are refreshed before use
const EXPIRY_SLACK_SECS: i64 = 60;

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// An OAuth client secret (the `installed` or `web` entry of the downloaded JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

impl ClientSecret {
    /// Load a client secret file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| {
            StoreError::Auth(format!(
                "unable to read client secret file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&data)
    }

    /// Parse a client secret from its JSON form
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let file: CredentialsFile = serde_json::from_slice(data)?;
        file.installed
            .or(file.web)
            .ok_or_else(|| StoreError::Auth("client secret has no 'installed' or 'web' entry".into()))
    }

    /// Redirect URI used for the consent flow
    pub fn redirect_uri(&self) -> &str {
        self.redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or("urn:ietf:wg:oauth:2.0:oob")
    }

    /// URL the user visits to grant offline access
    pub fn authorization_url(&self) -> Result<Url> {
        let url = Url::parse_with_params(
            &self.auth_uri,
            &[
                ("access_type", "offline"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri()),
                ("response_type", "code"),
                ("scope", SCOPES.join(" ").as_str()),
                ("state", "state-token"),
            ],
        )?;
        Ok(url)
    }

    /// Exchange an authorization code for a token
    pub async fn exchange_code(
        &self,
        client: &reqwest::Client,
        token_url: &str,
        code: &str,
    ) -> Result<OAuthToken> {
        let form = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri()),
            ("grant_type", "authorization_code"),
        ];
        let response = post_form(client, token_url, &form).await?;
        Ok(OAuthToken::from_response(response, None))
    }

    /// Obtain a fresh access token using `refresh_token`
    pub async fn refresh(
        &self,
        client: &reqwest::Client,
        token_url: &str,
        refresh_token: &str,
    ) -> Result<OAuthToken> {
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];
        let response = post_form(client, token_url, &form).await?;
        // The endpoint usually omits the refresh token on refresh; keep ours.
        Ok(OAuthToken::from_response(response, Some(refresh_token)))
    }
}

async fn post_form(
    client: &reqwest::Client,
    token_url: &str,
    form: &[(&str, &str)],
) -> Result<TokenResponse> {
    let response = client
        .post(token_url)
        .form(form)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(StoreError::Auth(format!(
            "token endpoint returned {}: {}",
            status.as_u16(),
            text
        )));
    }
    Ok(serde_json::from_str(&text)?)
}

/// A cached OAuth token, stored as JSON in the token file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl OAuthToken {
    fn from_response(response: TokenResponse, refresh_token: Option<&str>) -> Self {
        Self {
            access_token: response.access_token,
            token_type: response.token_type.unwrap_or_else(default_token_type),
            refresh_token: response
                .refresh_token
                .or_else(|| refresh_token.map(str::to_string)),
            expiry: response
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }

    /// Load a token file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Write the token file, readable only by the owner on Unix
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;
        file.write_all(&serde_json::to_vec(self)?)?;
        Ok(())
    }

    /// Check if the token is expired (or about to be) at `now`.
    ///
    /// A missing expiry, or one before the Unix epoch (the zero time some
    /// tools write), means the token does not expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) if expiry.timestamp() > 0 => {
                expiry - Duration::seconds(EXPIRY_SLACK_SECS) <= now
            }
            _ => false,
        }
    }

    /// Check if the token is expired (or about to be) now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
