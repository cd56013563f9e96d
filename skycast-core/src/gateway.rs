use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use thiserror::Error;
use tracing::debug;

use crate::model::{Coordinates, CurrentConditions, ForecastResponse, ForecastSample, UnitSystem};

pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Failure of a single gateway call. Non-success HTTP statuses carry no
/// diagnostic detail beyond which of the four call variants failed; the
/// orchestrator turns these into a user-visible advisory string anyway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to fetch {0}")]
    RequestFailed(&'static str),

    #[error("weather request could not be completed")]
    Transport(#[from] reqwest::Error),
}

/// I/O boundary to the weather data provider. Stateless: no retries,
/// no backoff, no per-request timeout.
#[async_trait]
pub trait WeatherGateway: Send + Sync + Debug {
    async fn current_by_city(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<CurrentConditions, GatewayError>;

    async fn current_by_coords(
        &self,
        coords: Coordinates,
        units: UnitSystem,
    ) -> Result<CurrentConditions, GatewayError>;

    async fn forecast_by_city(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<Vec<ForecastSample>, GatewayError>;

    async fn forecast_by_coords(
        &self,
        coords: Coordinates,
        units: UnitSystem,
    ) -> Result<Vec<ForecastSample>, GatewayError>;
}

/// Gateway over the OpenWeatherMap 2.5 REST API.
#[derive(Debug, Clone)]
pub struct OpenWeatherGateway {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherGateway {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL.to_string())
    }

    /// Point the gateway at a different base URL, e.g. a mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        locator: &[(&str, String)],
        units: UnitSystem,
        what: &'static str,
    ) -> Result<T, GatewayError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, units = units.as_str(), "requesting {what}");

        let res = self
            .http
            .get(&url)
            .query(locator)
            .query(&[("appid", self.api_key.as_str()), ("units", units.as_str())])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(GatewayError::RequestFailed(what));
        }

        Ok(res.json().await?)
    }
}

#[async_trait]
impl WeatherGateway for OpenWeatherGateway {
    async fn current_by_city(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<CurrentConditions, GatewayError> {
        self.get_json(
            "weather",
            &[("q", city.to_string())],
            units,
            "current weather by city",
        )
        .await
    }

    async fn current_by_coords(
        &self,
        coords: Coordinates,
        units: UnitSystem,
    ) -> Result<CurrentConditions, GatewayError> {
        self.get_json(
            "weather",
            &[("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())],
            units,
            "current weather by coordinates",
        )
        .await
    }

    async fn forecast_by_city(
        &self,
        city: &str,
        units: UnitSystem,
    ) -> Result<Vec<ForecastSample>, GatewayError> {
        let res: ForecastResponse = self
            .get_json(
                "forecast",
                &[("q", city.to_string())],
                units,
                "forecast by city",
            )
            .await?;

        Ok(res.list)
    }

    async fn forecast_by_coords(
        &self,
        coords: Coordinates,
        units: UnitSystem,
    ) -> Result<Vec<ForecastSample>, GatewayError> {
        let res: ForecastResponse = self
            .get_json(
                "forecast",
                &[("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())],
                units,
                "forecast by coordinates",
            )
            .await?;

        Ok(res.list)
    }
}
