//! Fetches typhoon records from the CWA typhoon database.

use anyhow::{Context, Result};
use reqwest::Client;

use crate::record::{RawTyphoon, RecordSource};

pub const TYPHOON_LIST_URL: &str =
    "https://rdc28.cwa.gov.tw/TDB/public/typhoon_list/get_typhoon";

/// Client for the typhoon list endpoint. One POST per year, no retries.
pub struct CwaTyphoonApi {
    client: Client,
    url: String,
}

impl CwaTyphoonApi {
    pub fn new() -> Self {
        Self::with_url(TYPHOON_LIST_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

impl Default for CwaTyphoonApi {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for CwaTyphoonApi {
    async fn records_for_year(&self, year: i32) -> Result<Vec<RawTyphoon>> {
        let response = self
            .client
            .post(&self.url)
            // without this header the service answers with an HTML error page
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&[("year", year.to_string())])
            .send()
            .await
            .with_context(|| format!("requesting typhoon records for {year}"))?
            .error_for_status()
            .with_context(|| format!("requesting typhoon records for {year}"))?;

        // The body is a bare JSON array served with a text content type, so
        // parse the raw bytes rather than relying on `Response::json`.
        let body = response.bytes().await?;
        let records = serde_json::from_slice(&body)
            .with_context(|| format!("parsing typhoon records for {year}"))?;

        Ok(records)
    }
}
