use std::collections::BTreeMap;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::Method;
use axum::Json;
use chrono::NaiveDate;
use serde_derive::Deserialize;
use tracing::{info, instrument};

use crate::aggregate::{self, AggregatedResponse};
use crate::constants::{self, AvailabilityEntry, RegionDescriptor, DATA_AVAILABILITY};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RangePath {
    region: String,
    #[serde(rename = "date")]
    start: Option<String>,
    end: Option<String>,
}

fn require_get(method: &Method) -> Result<(), ApiError> {
    if method == Method::GET {
        Ok(())
    } else {
        Err(ApiError::InvalidMethod(method.clone()))
    }
}

fn lookup_region(key: &str) -> Result<&'static RegionDescriptor, ApiError> {
    constants::region(key).ok_or_else(|| ApiError::InvalidRegion(key.to_string()))
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ApiError::InvalidDate(raw.to_string()))
}

pub async fn index(method: Method) -> Result<&'static str, ApiError> {
    require_get(&method)?;
    Ok("hello from the regional carbon and covid aggregator")
}

/// Path rejections surface only once the method has been accepted.
fn path_params<T>(path: Result<Path<T>, PathRejection>) -> Result<T, ApiError> {
    path.map(|Path(params)| params)
        .map_err(|rejection| ApiError::InvalidPath(rejection.body_text()))
}

#[instrument(skip(state, path))]
pub async fn regional_day(
    method: Method,
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<AggregatedResponse>, ApiError> {
    require_get(&method)?;
    let (region, date) = path_params(path)?;
    let descriptor = lookup_region(&region)?;
    let date = parse_date(&date)?;

    info!(region = descriptor.key, %date, "aggregating single day");
    Ok(Json(aggregate::single_day(&state, descriptor, date).await?))
}

#[instrument(skip(state, path))]
pub async fn regional_range(
    method: Method,
    State(state): State<AppState>,
    path: Result<Path<RangePath>, PathRejection>,
) -> Result<Json<AggregatedResponse>, ApiError> {
    require_get(&method)?;
    let RangePath { region, start, end } = path_params(path)?;
    let descriptor = lookup_region(&region)?;

    let (start, end) = match (start.filter(|s| !s.is_empty()), end.filter(|e| !e.is_empty())) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(ApiError::MissingDateBound),
    };
    let start = parse_date(&start)?;
    let end = parse_date(&end)?;
    if start >= end {
        return Err(ApiError::InvalidDateOrder);
    }

    info!(region = descriptor.key, %start, %end, "aggregating date range");
    Ok(Json(aggregate::date_range(&state, descriptor, start, end).await?))
}

pub async fn data_availability(
    method: Method,
) -> Result<Json<&'static BTreeMap<&'static str, AvailabilityEntry>>, ApiError> {
    require_get(&method)?;
    Ok(Json(&*DATA_AVAILABILITY))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_get_is_accepted() {
        assert!(require_get(&Method::GET).is_ok());
        assert!(matches!(require_get(&Method::POST), Err(ApiError::InvalidMethod(m)) if m == Method::POST));
    }

    #[test]
    fn dates_must_be_calendar_dates() {
        assert_eq!(parse_date("2020-05-01").unwrap(), NaiveDate::from_ymd_opt(2020, 5, 1).unwrap());
        for bad in ["2020-13-40", "2021-02-29", "01-05-2020", "yesterday", ""] {
            assert!(matches!(parse_date(bad), Err(ApiError::InvalidDate(_))), "{bad}");
        }
    }

    #[test]
    fn unknown_regions_are_rejected() {
        assert!(lookup_region("london").is_ok());
        assert!(matches!(lookup_region("mordor"), Err(ApiError::InvalidRegion(r)) if r == "mordor"));
    }
}
