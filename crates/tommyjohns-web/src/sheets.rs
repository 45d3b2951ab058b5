//! Google Sheets v4 client used by the `import-sheet` command
//!
//! Read-only: fetches a spreadsheet's title and one value range with an API
//! key. Nothing fetched here is written to the database.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tommyjohns_common::{Result, TjError};
use tommyjohns_config::{ConfigError, SheetsConfig};
use tracing::{debug, info, instrument};
use url::Url;

/// Spreadsheet metadata, reduced to what the importer reports
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetMetadata {
    pub spreadsheet_id: String,
    pub properties: SpreadsheetProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpreadsheetProperties {
    pub title: String,
}

/// One A1 range of cell values, row-major
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValueRange {
    pub range: String,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl SheetsClient {
    pub fn new(config: &SheetsConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingConfig("sheets.api_key".to_string()).into());
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            TjError::config_with_source(format!("invalid sheets.base_url '{}'", config.base_url), e)
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| TjError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// `{base}/{sheet_id}[/{extra}...]?key={api_key}`
    fn build_url(&self, sheet_id: &str, extra: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TjError::config(format!("sheets base URL '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(sheet_id)
            .extend(extra);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    pub fn spreadsheet_url(&self, sheet_id: &str) -> Result<Url> {
        self.build_url(sheet_id, &[])
    }

    pub fn values_url(&self, sheet_id: &str, range: &str) -> Result<Url> {
        self.build_url(sheet_id, &["values", range])
    }

    async fn get_json<T>(&self, url: Url) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TjError::network_with_source("Sheets request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TjError::network(format!("Sheets API returned {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| TjError::network_with_source("Failed to read response body", e))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch the spreadsheet's id and title.
    #[instrument(skip(self))]
    pub async fn fetch_metadata(&self, sheet_id: &str) -> Result<SpreadsheetMetadata> {
        let metadata: SpreadsheetMetadata = self.get_json(self.spreadsheet_url(sheet_id)?).await?;
        info!("Fetched spreadsheet '{}'", metadata.properties.title);
        Ok(metadata)
    }

    /// Fetch the cell values of `range`.
    #[instrument(skip(self))]
    pub async fn fetch_values(&self, sheet_id: &str, range: &str) -> Result<ValueRange> {
        let values: ValueRange = self.get_json(self.values_url(sheet_id, range)?).await?;
        debug!("Fetched {} rows from {}", values.values.len(), values.range);
        Ok(values)
    }
}
