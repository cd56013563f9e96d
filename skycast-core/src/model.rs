use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Measurement convention sent to the provider and used for display.
///
/// The provider also supports a Kelvin-based `standard` mode, but the
/// dashboard only ever requests `metric` or `imperial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// The other unit system; the dashboard toggle cycles between the two.
    pub fn toggled(&self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    /// Temperature suffix for display, e.g. `21°C`.
    pub fn temp_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "C",
            UnitSystem::Imperial => "F",
        }
    }

    /// Wind speed unit for display.
    pub fn wind_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "mph",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// Geographic position in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// How the provider is addressed. Exactly one representation is
/// authoritative at a time: whichever locator last produced data is
/// reused for refetches (e.g. unit toggles).
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Coords(Coordinates),
    City(String),
}

// Provider payloads below decode permissively: every sub-structure and
// field is optional, so a partial response never fails to decode.
// Renderers substitute placeholders for whatever is missing.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionInfo {
    pub main: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MainInfo {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub humidity: Option<u32>,
    pub pressure: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindInfo {
    pub speed: Option<f64>,
    pub deg: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SysInfo {
    pub country: Option<String>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloudsInfo {
    pub all: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Coord {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Snapshot of current conditions at one location. Always replaced
/// wholesale on refetch, never merged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentConditions {
    pub name: Option<String>,
    pub coord: Option<Coord>,
    pub dt: Option<i64>,
    #[serde(default)]
    pub main: MainInfo,
    #[serde(default)]
    pub weather: Vec<ConditionInfo>,
    pub wind: Option<WindInfo>,
    pub sys: Option<SysInfo>,
    pub clouds: Option<CloudsInfo>,
    pub visibility: Option<u32>,
}

impl CurrentConditions {
    /// First condition entry, which the provider treats as primary.
    pub fn condition(&self) -> Option<&ConditionInfo> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleMain {
    pub temp: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
}

/// One raw forecast entry, typically at 3-hour resolution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    #[serde(default)]
    pub main: SampleMain,
    #[serde(default)]
    pub weather: Vec<ConditionInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastCity {
    pub name: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastSample>,
    pub city: Option<ForecastCity>,
}

/// One day's aggregate of forecast samples. Derived data: computed fresh
/// on every forecast fetch, never persisted, immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub min: f64,
    pub max: f64,
    pub icon: Option<String>,
}
