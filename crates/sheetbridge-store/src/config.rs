//! Store configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Configuration for [`GoogleSheetsStore`](crate::GoogleSheetsStore).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// OAuth client secret JSON downloaded from the cloud console. Default: "credentials.json".
    pub credentials_path: PathBuf,
    /// Cached OAuth token, rewritten after every refresh. Default: "token.json".
    pub token_path: PathBuf,
    /// Sheets API root. Default: "https://sheets.googleapis.com/v4/".
    pub sheets_base_url: String,
    /// Drive API root. Default: "https://www.googleapis.com/drive/v3/".
    pub drive_base_url: String,
    /// Token endpoint. If None, uses the one named in the client secret.
    pub token_url: Option<String>,
    /// Per-request timeout in seconds. Default: 30.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("credentials.json"),
            token_path: PathBuf::from("token.json"),
            sheets_base_url: "https://sheets.googleapis.com/v4/".to_string(),
            drive_base_url: "https://www.googleapis.com/drive/v3/".to_string(),
            token_url: None,
            timeout_secs: 30,
        }
    }
}

impl StoreConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"token_path": "/tmp/tok.json", "timeout_secs": 5}"#).unwrap();

        assert_eq!(config.token_path, PathBuf::from("/tmp/tok.json"));
        assert_eq!(config.credentials_path, PathBuf::from("credentials.json"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.sheets_base_url.ends_with("/v4/"));
        assert!(config.token_url.is_none());
    }
}
