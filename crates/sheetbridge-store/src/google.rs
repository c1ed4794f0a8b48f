//! Google Sheets v4 / Drive v3 backend.

use std::io::ErrorKind;
use std::path::PathBuf;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use sheetbridge_core::{CellMatrix, Row};
use tokio::sync::Mutex;
use url::Url;

use crate::auth::{ClientSecret, OAuthToken};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::store::{SheetOperation, SheetStore, SpreadsheetFile, SpreadsheetInfo};
use crate::wire::{
    BatchUpdateBody, ErrorEnvelope, FileList, Spreadsheet, ValueRange, ValueRangeBody,
};

const SPREADSHEET_MIME_QUERY: &str = "mimeType='application/vnd.google-apps.spreadsheet'";
const FILE_FIELDS: &str = "nextPageToken, files(id, name, createdTime, modifiedTime)";
const SPREADSHEET_FIELDS: &str = "spreadsheetId,properties.title,sheets.properties";

/// A [`SheetStore`] backed by the Google Sheets and Drive REST APIs.
///
/// The store owns one HTTP client and the cached OAuth token. The token is
/// refreshed under a lock when it is about to expire, so concurrent requests
/// never race on the token file.
pub struct GoogleSheetsStore {
    client: Client,
    secret: ClientSecret,
    token: Mutex<OAuthToken>,
    token_path: PathBuf,
    token_url: String,
    sheets_base: Url,
    drive_base: Url,
}

impl GoogleSheetsStore {
    /// Load the client secret and cached token named by `config` and build the store.
    pub async fn connect(config: StoreConfig) -> Result<Self> {
        let secret = ClientSecret::load(&config.credentials_path)?;
        let token = match OAuthToken::load(&config.token_path) {
            Ok(token) => token,
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::Auth(format!(
                    "no cached token at {}; run `sheetbridge auth` first",
                    config.token_path.display()
                )));
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            "Loaded OAuth token from {}",
            config.token_path.display()
        );
        Self::new(config, secret, token)
    }

    /// Build a store from an already-loaded secret and token.
    pub fn new(config: StoreConfig, secret: ClientSecret, token: OAuthToken) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        let token_url = config
            .token_url
            .clone()
            .unwrap_or_else(|| secret.token_uri.clone());

        Ok(Self {
            client,
            secret,
            token: Mutex::new(token),
            token_path: config.token_path,
            token_url,
            sheets_base: Url::parse(&config.sheets_base_url)?,
            drive_base: Url::parse(&config.drive_base_url)?,
        })
    }

    /// Consent URL for the first-run authorization flow.
    pub fn authorization_url(config: &StoreConfig) -> Result<Url> {
        ClientSecret::load(&config.credentials_path)?.authorization_url()
    }

    /// Exchange an authorization code and write the token file.
    pub async fn authorize(config: &StoreConfig, code: &str) -> Result<OAuthToken> {
        let secret = ClientSecret::load(&config.credentials_path)?;
        let token_url = config
            .token_url
            .clone()
            .unwrap_or_else(|| secret.token_uri.clone());
        let client = Client::builder().timeout(config.timeout()).build()?;

        let token = secret.exchange_code(&client, &token_url, code).await?;
        token.save(&config.token_path)?;
        tracing::info!("Saved OAuth token to {}", config.token_path.display());
        Ok(token)
    }

    async fn access_token(&self) -> Result<String> {
        let mut token = self.token.lock().await;
        if token.is_expired() {
            let refresh_token = token.refresh_token.clone().ok_or_else(|| {
                StoreError::Auth(
                    "token expired and has no refresh token; run `sheetbridge auth` again".into(),
                )
            })?;
            let refreshed = self
                .secret
                .refresh(&self.client, &self.token_url, &refresh_token)
                .await
                .inspect_err(|e| tracing::warn!("OAuth token refresh failed: {e}"))?;
            refreshed.save(&self.token_path)?;
            tracing::debug!("Refreshed OAuth token");
            *token = refreshed;
        }
        Ok(token.access_token.clone())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let access_token = self.access_token().await?;
        let response = request.bearer_auth(access_token).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
            _ => body,
        };
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        Ok(self.send(request).await?.json::<T>().await?)
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url> {
        endpoint(
            &self.sheets_base,
            &["spreadsheets", spreadsheet_id, "values", range],
        )
    }
}

/// Append `segments` to `base`, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn user_entered(mut url: Url) -> Url {
    url.query_pairs_mut()
        .append_pair("valueInputOption", "USER_ENTERED");
    url
}

impl SheetStore for GoogleSheetsStore {
    async fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<CellMatrix> {
        let url = self.values_url(spreadsheet_id, range)?;
        let values: ValueRange = self.fetch(self.client.get(url)).await?;
        Ok(values.into_matrix())
    }

    async fn write_range(&self, spreadsheet_id: &str, address: &str, rows: &[Row]) -> Result<()> {
        let url = user_entered(self.values_url(spreadsheet_id, address)?);
        self.send(self.client.put(url).json(&ValueRangeBody::rows(rows)))
            .await?;
        tracing::debug!("Wrote {} row(s) to {address}", rows.len());
        Ok(())
    }

    async fn append_range(&self, spreadsheet_id: &str, address: &str, rows: &[Row]) -> Result<()> {
        let url = user_entered(endpoint(
            &self.sheets_base,
            &[
                "spreadsheets",
                spreadsheet_id,
                "values",
                &format!("{address}:append"),
            ],
        )?);
        self.send(self.client.post(url).json(&ValueRangeBody::rows(rows)))
            .await?;
        tracing::debug!("Appended {} row(s) at {address}", rows.len());
        Ok(())
    }

    async fn clear_range(&self, spreadsheet_id: &str, address: &str) -> Result<()> {
        let url = endpoint(
            &self.sheets_base,
            &[
                "spreadsheets",
                spreadsheet_id,
                "values",
                &format!("{address}:clear"),
            ],
        )?;
        self.send(self.client.post(url).json(&serde_json::json!({})))
            .await?;
        tracing::debug!("Cleared {address}");
        Ok(())
    }

    async fn batch_update(&self, spreadsheet_id: &str, operations: Vec<SheetOperation>) -> Result<()> {
        let url = endpoint(
            &self.sheets_base,
            &["spreadsheets", &format!("{spreadsheet_id}:batchUpdate")],
        )?;
        let body = BatchUpdateBody::new(operations);
        self.send(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    async fn spreadsheet(&self, spreadsheet_id: &str) -> Result<SpreadsheetInfo> {
        let mut url = endpoint(&self.sheets_base, &["spreadsheets", spreadsheet_id])?;
        url.query_pairs_mut()
            .append_pair("fields", SPREADSHEET_FIELDS);

        let spreadsheet: Spreadsheet = self.fetch(self.client.get(url)).await?;
        let mut info = spreadsheet.into_info();
        if info.id.is_empty() {
            info.id = spreadsheet_id.to_string();
        }
        Ok(info)
    }

    async fn create_spreadsheet(&self, title: &str) -> Result<String> {
        let url = endpoint(&self.sheets_base, &["spreadsheets"])?;
        let body = Spreadsheet::new_with_title(title);
        let created: Spreadsheet = self.fetch(self.client.post(url).json(&body)).await?;
        tracing::info!("Created new spreadsheet: {}", created.spreadsheet_id);
        Ok(created.spreadsheet_id)
    }

    async fn delete_spreadsheet(&self, spreadsheet_id: &str) -> Result<()> {
        // Drive reports a missing file less clearly than Sheets does.
        self.spreadsheet(spreadsheet_id).await?;

        let url = endpoint(&self.drive_base, &["files", spreadsheet_id])?;
        self.send(self.client.delete(url)).await?;
        tracing::info!("Deleted spreadsheet: {spreadsheet_id}");
        Ok(())
    }

    async fn list_spreadsheets(&self) -> Result<Vec<SpreadsheetFile>> {
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = endpoint(&self.drive_base, &["files"])?;
            {
                let mut query = url.query_pairs_mut();
                query
                    .append_pair("q", SPREADSHEET_MIME_QUERY)
                    .append_pair("fields", FILE_FIELDS)
                    .append_pair("orderBy", "modifiedTime desc");
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            let page: FileList = self.fetch(self.client.get(url)).await?;
            files.extend(page.files.into_iter().map(SpreadsheetFile::from));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(files)
    }
}
