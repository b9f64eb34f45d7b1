use async_trait::async_trait;
use axum::http::Uri;
use chrono::NaiveDate;
use serde_json::Value;

use crate::constants::CovidRegion;
use crate::upstream::{get_json, join, HttpsClient, UpstreamError};

const BANNER_TYPE: &str = "Daily Summary";

/// Daily COVID-19 banners published for a region.
#[async_trait]
pub trait CovidSource: Send + Sync {
    /// Records published on `date`, in upstream order. Empty when there are none.
    async fn banners(
        &self,
        date: NaiveDate,
        region: &CovidRegion,
    ) -> Result<Vec<Value>, UpstreamError>;
}

pub struct CovidClient {
    base_url: String,
    client: HttpsClient,
}

impl CovidClient {
    pub fn new(base_url: impl Into<String>, client: HttpsClient) -> Self {
        Self { base_url: base_url.into(), client }
    }
}

#[async_trait]
impl CovidSource for CovidClient {
    async fn banners(
        &self,
        date: NaiveDate,
        region: &CovidRegion,
    ) -> Result<Vec<Value>, UpstreamError> {
        let uri: Uri = banners_uri(&self.base_url, date, region).parse()?;
        Ok(into_records(get_json(&self.client, uri).await?))
    }
}

fn banners_uri(base_url: &str, date: NaiveDate, region: &CovidRegion) -> String {
    let date = date.format("%Y-%m-%d");
    let banner_type = urlencoding::encode(BANNER_TYPE);
    let region_type = urlencoding::encode(region.region_type);
    let region_name = urlencoding::encode(region.region_name);

    join(
        base_url,
        &format!("/log_banners/{date}/{banner_type}/{region_type}/{region_name}"),
    )
}

fn into_records(body: Value) -> Vec<Value> {
    match body {
        Value::Array(records) => records,
        Value::Null => vec![],
        record => vec![record],
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn banner_path_is_encoded() {
        let region = CovidRegion { region_type: "Region", region_name: "Yorkshire and The Humber" };
        let date = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();

        let uri = banners_uri("https://api.coronavirus.data.gov.uk/generic", date, &region);
        assert_eq!(
            uri,
            "https://api.coronavirus.data.gov.uk/generic/log_banners/2020-05-01/Daily%20Summary/Region/Yorkshire%20and%20The%20Humber"
        );
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn array_body_is_the_record_list() {
        let records = into_records(json!([{ "n": 1 }, { "n": 2 }]));
        assert_eq!(records, vec![json!({ "n": 1 }), json!({ "n": 2 })]);
        assert!(into_records(json!([])).is_empty());
    }

    #[test]
    fn other_bodies() {
        assert!(into_records(Value::Null).is_empty());
        assert_eq!(into_records(json!({ "n": 1 })), vec![json!({ "n": 1 })]);
    }
}
