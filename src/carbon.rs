use async_trait::async_trait;
use axum::http::Uri;
use chrono::NaiveDate;
use serde_json::Value;

use crate::upstream::{get_json, join, HttpsClient, UpstreamError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Regional carbon-intensity readings. Payloads are relayed untouched.
#[async_trait]
pub trait CarbonSource: Send + Sync {
    /// The 24 hours starting at `date`.
    async fn day(&self, region_id: u32, date: NaiveDate) -> Result<Value, UpstreamError>;

    async fn range(
        &self,
        region_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Value, UpstreamError>;
}

pub struct CarbonClient {
    base_url: String,
    client: HttpsClient,
}

impl CarbonClient {
    pub fn new(base_url: impl Into<String>, client: HttpsClient) -> Self {
        Self { base_url: base_url.into(), client }
    }
}

#[async_trait]
impl CarbonSource for CarbonClient {
    async fn day(&self, region_id: u32, date: NaiveDate) -> Result<Value, UpstreamError> {
        let uri: Uri = day_uri(&self.base_url, region_id, date).parse()?;
        get_json(&self.client, uri).await
    }

    async fn range(
        &self,
        region_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Value, UpstreamError> {
        let uri: Uri = range_uri(&self.base_url, region_id, start, end).parse()?;
        get_json(&self.client, uri).await
    }
}

fn day_uri(base_url: &str, region_id: u32, date: NaiveDate) -> String {
    let date = date.format(DATE_FORMAT);
    join(base_url, &format!("/regional/intensity/{date}/pt24h/regionid/{region_id}"))
}

fn range_uri(base_url: &str, region_id: u32, start: NaiveDate, end: NaiveDate) -> String {
    let start = start.format(DATE_FORMAT);
    let end = end.format(DATE_FORMAT);
    join(base_url, &format!("/regional/intensity/{start}/{end}/regionid/{region_id}"))
}
