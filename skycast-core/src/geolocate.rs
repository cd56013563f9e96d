use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::model::Coordinates;

pub const IP_GEOLOCATION_BASE_URL: &str = "https://ipapi.co";

/// Why a position fix could not be obtained. The orchestrator treats
/// all variants identically (fall back to the default city), so these
/// exist for logging and for callers that want to distinguish.
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("geolocation is not available")]
    Unavailable,

    #[error("geolocation request was denied")]
    Denied,

    #[error("timed out waiting for a position fix")]
    Timeout,
}

/// Single-shot acquisition of the device's current position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn acquire(&self, timeout: Duration) -> Result<Coordinates, GeolocationError>;
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    country_name: Option<String>,
}

/// Approximate position from the machine's public IP address, the
/// terminal-client stand-in for a device location service.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    base_url: String,
    http: Client,
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IpGeolocator {
    pub fn new() -> Self {
        Self::with_base_url(IP_GEOLOCATION_BASE_URL.to_string())
    }

    /// Point the lookup at a different base URL, e.g. a mock server.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    async fn lookup(&self) -> Result<Coordinates, GeolocationError> {
        let url = format!("{}/json/", self.base_url);

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|_| GeolocationError::Unavailable)?;

        if res.status() == StatusCode::FORBIDDEN {
            return Err(GeolocationError::Denied);
        }
        if !res.status().is_success() {
            return Err(GeolocationError::Unavailable);
        }

        let parsed: IpApiResponse = res
            .json()
            .await
            .map_err(|_| GeolocationError::Unavailable)?;

        match (parsed.latitude, parsed.longitude) {
            (Some(lat), Some(lon)) => {
                debug!(
                    lat,
                    lon,
                    city = parsed.city.as_deref().unwrap_or("?"),
                    country = parsed.country_name.as_deref().unwrap_or("?"),
                    "resolved position from IP"
                );
                Ok(Coordinates { lat, lon })
            }
            _ => Err(GeolocationError::Unavailable),
        }
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn acquire(&self, timeout: Duration) -> Result<Coordinates, GeolocationError> {
        tokio::time::timeout(timeout, self.lookup())
            .await
            .map_err(|_| GeolocationError::Timeout)?
    }
}
