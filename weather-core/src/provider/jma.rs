use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::{collections::BTreeMap, time::Duration};
use tracing::debug;

use crate::{
    Config,
    error::WeatherError,
    model::{Area, AreaForecast, ForecastEntry},
};

use super::{ForecastProvider, validate_area_code};

/// Japan Meteorological Agency forecast JSON endpoints.
#[derive(Debug, Clone)]
pub struct JmaProvider {
    http: Client,
    config: Config,
}

impl JmaProvider {
    pub fn new(config: &Config) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(WeatherError::Client)?;

        Ok(Self { http, config: config.clone() })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeatherError> {
        debug!(%url, "Requesting JMA data");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| WeatherError::Request { url: url.to_string(), source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Request { url: url.to_string(), source })?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                url: url.to_string(),
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|source| WeatherError::Parse { url: url.to_string(), source })
    }
}

#[async_trait]
impl ForecastProvider for JmaProvider {
    async fn list_areas(&self) -> Result<Vec<Area>, WeatherError> {
        let index: JmaAreaIndex = self.get_json(&self.config.area_url).await?;
        debug!(offices = index.offices.len(), "Loaded area index");

        Ok(index
            .offices
            .into_iter()
            .map(|(code, office)| Area { code, name: office.name, en_name: office.en_name })
            .collect())
    }

    async fn get_forecast(&self, area_code: &str) -> Result<AreaForecast, WeatherError> {
        let code = validate_area_code(area_code)?;
        let reports: Vec<JmaReport> = self.get_json(&self.config.forecast_url_for(code)).await?;

        forecast_from_reports(code, reports)
    }
}

/// Short-term forecast: first report, first time series, first sub-area.
fn forecast_from_reports(
    area_code: &str,
    reports: Vec<JmaReport>,
) -> Result<AreaForecast, WeatherError> {
    let missing = || WeatherError::MissingData(area_code.to_string());

    let report = reports.into_iter().next().ok_or_else(missing)?;
    let series = report.time_series.into_iter().next().ok_or_else(missing)?;
    let area = series.areas.into_iter().next().ok_or_else(missing)?;

    let entries = series
        .time_defines
        .into_iter()
        .zip(area.weathers)
        .map(|(time, weather)| ForecastEntry { time, weather })
        .collect();

    Ok(AreaForecast {
        area_code: area_code.to_string(),
        area_name: area.area.name,
        publishing_office: report.publishing_office,
        report_time: report.report_datetime,
        entries,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JmaOffice {
    name: String,
    #[serde(default)]
    en_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JmaAreaIndex {
    offices: BTreeMap<String, JmaOffice>,
}

#[derive(Debug, Deserialize)]
struct JmaAreaRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct JmaSeriesArea {
    area: JmaAreaRef,
    // only the short-term series carries weather text
    #[serde(default)]
    weathers: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JmaTimeSeries {
    time_defines: Vec<DateTime<FixedOffset>>,
    areas: Vec<JmaSeriesArea>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JmaReport {
    #[serde(default)]
    publishing_office: Option<String>,
    #[serde(default)]
    report_datetime: Option<DateTime<FixedOffset>>,
    time_series: Vec<JmaTimeSeries>,
}
