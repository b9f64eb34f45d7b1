//! Merges one carbon-intensity payload with the COVID banners for the same
//! region and dates.
//!
//! Carbon data is always relayed as-is. COVID data is relayed when the region
//! has a COVID mapping and the upstream had records; otherwise the `covid`
//! field explains why it is empty. Any upstream failure aborts the whole
//! aggregation.

use chrono::NaiveDate;
use serde_derive::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::{covid_regions, RegionDescriptor};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize, PartialEq)]
pub struct AggregatedResponse {
    pub carbon: Value,
    pub covid: CovidPayload,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CovidPayload {
    Records(Vec<Value>),
    Unavailable { error: String },
}

impl CovidPayload {
    fn unavailable(error: String) -> Self {
        CovidPayload::Unavailable { error }
    }

    fn no_capability(region: &RegionDescriptor) -> Self {
        let mut message = format!("no covid data available for {}. data available for ", region.key);
        for (i, key) in covid_regions().enumerate() {
            if i > 0 {
                message.push_str(", ");
            }
            message.push_str(key);
        }
        Self::unavailable(message)
    }
}

pub async fn single_day(
    state: &AppState,
    region: &RegionDescriptor,
    date: NaiveDate,
) -> Result<AggregatedResponse, ApiError> {
    let carbon = state
        .carbon
        .day(region.carbon_region_id, date)
        .await
        .map_err(|e| {
            warn!(region = region.key, %date, error = %e, "carbon intensity upstream failed");
            ApiError::UpstreamCarbon(e)
        })?;

    let covid = match &region.covid {
        None => CovidPayload::no_capability(region),
        Some(covid_region) => {
            let records = state.covid.banners(date, covid_region).await.map_err(|e| {
                warn!(region = region.key, %date, error = %e, "covid upstream failed");
                ApiError::UpstreamCovid(e)
            })?;

            if records.is_empty() {
                CovidPayload::unavailable(format!("no data found for {} on {}", region.key, date))
            } else {
                CovidPayload::Records(records)
            }
        }
    };

    Ok(AggregatedResponse { carbon, covid })
}

pub async fn date_range(
    state: &AppState,
    region: &RegionDescriptor,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<AggregatedResponse, ApiError> {
    let carbon = state
        .carbon
        .range(region.carbon_region_id, start, end)
        .await
        .map_err(|e| {
            warn!(region = region.key, %start, %end, error = %e, "carbon intensity upstream failed");
            ApiError::UpstreamCarbon(e)
        })?;

    let covid = match &region.covid {
        None => CovidPayload::no_capability(region),
        Some(covid_region) => {
            let mut records = vec![];
            for date in days(start, end) {
                let day = state.covid.banners(date, covid_region).await.map_err(|e| {
                    warn!(region = region.key, %date, error = %e, "covid upstream failed, discarding range");
                    ApiError::UpstreamCovid(e)
                })?;
                debug!(%date, records = day.len(), "covid day fetched");
                records.extend(day);
            }

            if records.is_empty() {
                CovidPayload::unavailable(format!(
                    "no data found for {} between {} and {}",
                    region.key, start, end
                ))
            } else {
                CovidPayload::Records(records)
            }
        }
    };

    Ok(AggregatedResponse { carbon, covid })
}

/// Every calendar day from `start` to `end`, both inclusive.
fn days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}
