//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The gateway to the OpenWeatherMap REST API
//! - Forecast aggregation into daily summaries
//! - The session load orchestrator (geolocate, fall back, refetch)
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries
//! or services that want the same data flow without the terminal UI.

pub mod config;
pub mod forecast;
pub mod gateway;
pub mod geolocate;
pub mod model;
pub mod session;

pub use config::Config;
pub use forecast::to_daily;
pub use gateway::{GatewayError, OpenWeatherGateway, WeatherGateway};
pub use geolocate::{GeolocationError, Geolocator, IpGeolocator};
pub use model::{
    Coordinates, CurrentConditions, DailySummary, ForecastSample, Location, UnitSystem,
};
pub use session::{Orchestrator, Session};
