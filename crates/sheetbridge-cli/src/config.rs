//! Configuration file and environment handling.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use sheetbridge::StoreConfig;

/// Config file read when `--config` is not given, if present
pub const DEFAULT_CONFIG_FILE: &str = "sheetbridge.toml";

pub const CREDENTIALS_ENV: &str = "SHEETBRIDGE_CREDENTIALS";
pub const TOKEN_ENV: &str = "SHEETBRIDGE_TOKEN";

/// Layout of `sheetbridge.toml`
///
/// ```toml
/// [store]
/// credentials_path = "credentials.json"
/// token_path = "token.json"
/// timeout_secs = 30
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    store: StoreConfig,
}

/// Path overrides taken from the command line
#[derive(Debug, Default)]
pub struct Overrides {
    pub credentials: Option<PathBuf>,
    pub token: Option<PathBuf>,
}

/// Parse a config file's contents
pub fn parse(content: &str) -> Result<StoreConfig> {
    let file: ConfigFile = toml::from_str(content).context("Invalid config file")?;
    Ok(file.store)
}

/// Build the store config: file, then environment, then flags.
pub fn load<F>(path: Option<&Path>, overrides: Overrides, env: F) -> Result<StoreConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config '{}'", path.display()))?;
            parse(&content).with_context(|| format!("In '{}'", path.display()))?
        }
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            let content = std::fs::read_to_string(DEFAULT_CONFIG_FILE)
                .with_context(|| format!("Failed to read config '{DEFAULT_CONFIG_FILE}'"))?;
            parse(&content).with_context(|| format!("In '{DEFAULT_CONFIG_FILE}'"))?
        }
        None => StoreConfig::default(),
    };

    if let Some(path) = env(CREDENTIALS_ENV) {
        config.credentials_path = PathBuf::from(path);
    }
    if let Some(path) = env(TOKEN_ENV) {
        config.token_path = PathBuf::from(path);
    }

    if let Some(path) = overrides.credentials {
        config.credentials_path = path;
    }
    if let Some(path) = overrides.token {
        config.token_path = path;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_parse_store_section() {
        let config = parse(
            r#"
            [store]
            token_path = "/var/lib/sheetbridge/token.json"
            timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.token_path, PathBuf::from("/var/lib/sheetbridge/token.json"));
        assert_eq!(config.credentials_path, PathBuf::from("credentials.json"));
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = parse("").unwrap();
        assert_eq!(config.token_path, PathBuf::from("token.json"));
    }

    #[test]
    fn test_rejects_bad_types() {
        assert!(parse("[store]\ntimeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheetbridge.toml");
        std::fs::write(
            &path,
            "[store]\ncredentials_path = \"file-creds.json\"\ntoken_path = \"file-token.json\"\n",
        )
        .unwrap();

        let config = load(Some(&path), Overrides::default(), no_env).unwrap();
        assert_eq!(config.credentials_path, PathBuf::from("file-creds.json"));

        let env = |key: &str| (key == TOKEN_ENV).then(|| "env-token.json".to_string());
        let config = load(Some(&path), Overrides::default(), env).unwrap();
        assert_eq!(config.token_path, PathBuf::from("env-token.json"));
        assert_eq!(config.credentials_path, PathBuf::from("file-creds.json"));

        let overrides = Overrides {
            credentials: None,
            token: Some(PathBuf::from("flag-token.json")),
        };
        let config = load(Some(&path), overrides, env).unwrap();
        assert_eq!(config.token_path, PathBuf::from("flag-token.json"));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load(Some(&path), Overrides::default(), no_env).is_err());
    }
}
