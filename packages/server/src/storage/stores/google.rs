//! Google Sheets v4 [`SheetStore`] implementation.
//!
//! Talks to the Sheets REST API with a bearer token from
//! [`ServiceAccountAuth`]. Value operations address the sheet by title;
//! row deletion goes through `batchUpdate` with a `DeleteDimension` request
//! and addresses the sheet by its numeric grid id.

use anyhow::Context;
use serde::Deserialize;
use serde_json::json;

use gearbook_core::sheet::{CellRef, RowRange};

use crate::storage::sheet_store::SheetStore;
use crate::storage::stores::google_auth::ServiceAccountAuth;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Addressing configuration for one backing spreadsheet.
#[derive(Debug, Clone)]
pub struct GoogleSheetConfig {
    /// Document id from the spreadsheet URL.
    pub spreadsheet_id: String,
    /// Sheet title used by value operations. The production document uses
    /// its first sheet.
    pub sheet_title: String,
    /// Numeric grid id used by row deletion. The first sheet is 0.
    pub sheet_grid_id: i64,
}

impl GoogleSheetConfig {
    fn values_url(&self, range: Option<&str>) -> String {
        match range {
            Some(range) => format!(
                "{SHEETS_API_BASE}/{}/values/{}!{range}",
                self.spreadsheet_id, self.sheet_title,
            ),
            None => format!(
                "{SHEETS_API_BASE}/{}/values/{}",
                self.spreadsheet_id, self.sheet_title,
            ),
        }
    }

    fn append_url(&self) -> String {
        format!(
            "{SHEETS_API_BASE}/{}/values/{}!A1:append",
            self.spreadsheet_id, self.sheet_title,
        )
    }

    fn batch_update_url(&self) -> String {
        format!("{SHEETS_API_BASE}/{}:batchUpdate", self.spreadsheet_id)
    }
}

/// Response shape of a `values get` call.
///
/// The API omits `values` entirely for an empty range.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<serde_json::Value>>>,
}

/// Remote sheet store backed by the Google Sheets v4 API.
pub struct GoogleSheetStore {
    config: GoogleSheetConfig,
    auth: ServiceAccountAuth,
    http: reqwest::Client,
}

impl GoogleSheetStore {
    /// Creates a store for the configured spreadsheet.
    #[must_use]
    pub fn new(config: GoogleSheetConfig, auth: ServiceAccountAuth, http: reqwest::Client) -> Self {
        Self { config, auth, http }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> anyhow::Result<reqwest::Response> {
        let token = self.auth.bearer_token().await?;
        request
            .bearer_auth(token)
            .send()
            .await
            .with_context(|| format!("sending {what} request"))?
            .error_for_status()
            .with_context(|| format!("{what} rejected by the sheets api"))
    }
}

#[async_trait::async_trait]
impl SheetStore for GoogleSheetStore {
    async fn rows(&self) -> anyhow::Result<Vec<Vec<String>>> {
        let request = self.http.get(self.config.values_url(None));
        let range: ValueRange = self
            .send(request, "whole-sheet read")
            .await?
            .json()
            .await
            .context("decoding whole-sheet read response")?;
        Ok(rows_from_values(range.values.unwrap_or_default()))
    }

    async fn cell(&self, cell: CellRef) -> anyhow::Result<Option<String>> {
        let request = self
            .http
            .get(self.config.values_url(Some(&cell.to_string())));
        let range: ValueRange = self
            .send(request, "single-cell read")
            .await?
            .json()
            .await
            .context("decoding single-cell read response")?;

        let value = rows_from_values(range.values.unwrap_or_default())
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .filter(|value| !value.is_empty());
        Ok(value)
    }

    async fn append_row(&self, row: Vec<String>) -> anyhow::Result<()> {
        let request = self
            .http
            .post(self.config.append_url())
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [row] }));
        self.send(request, "append-row").await?;
        Ok(())
    }

    async fn update_range(&self, range: RowRange, values: Vec<String>) -> anyhow::Result<()> {
        if values.len() != range.width() as usize {
            anyhow::bail!(
                "range {range} covers {} cells but {} values were given",
                range.width(),
                values.len(),
            );
        }

        let request = self
            .http
            .put(self.config.values_url(Some(&range.to_string())))
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "values": [values] }));
        self.send(request, "range update").await?;
        Ok(())
    }

    async fn delete_row(&self, row: u32) -> anyhow::Result<()> {
        if row == 0 {
            anyhow::bail!("sheet rows are 1-based");
        }

        let request = self
            .http
            .post(self.config.batch_update_url())
            .json(&delete_dimension_body(self.config.sheet_grid_id, row));
        self.send(request, "row delete").await?;
        Ok(())
    }
}

/// Converts API cell values to strings.
///
/// Formatted values arrive as JSON strings; anything else (numbers from
/// unformatted ranges, booleans) is rendered through its JSON form. Nulls
/// become empty cells.
fn rows_from_values(values: Vec<Vec<serde_json::Value>>) -> Vec<Vec<String>> {
    values
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|value| match value {
                    serde_json::Value::String(text) => text,
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

/// Builds the `batchUpdate` body removing one 1-based sheet row.
///
/// The API takes a half-open 0-based row interval.
fn delete_dimension_body(sheet_id: i64, row: u32) -> serde_json::Value {
    json!({
        "requests": [{
            "deleteDimension": {
                "range": {
                    "sheetId": sheet_id,
                    "dimension": "ROWS",
                    "startIndex": row - 1,
                    "endIndex": row,
                }
            }
        }]
    })
}
