//! Session state and the load orchestrator.
//!
//! All weather data shown by the dashboard flows through [`Orchestrator`]:
//! it owns the [`Session`] record and mutates it in exactly three
//! transitions (initial load, unit change, explicit search). Renderers
//! only ever read the session.

use std::time::Duration;
use tracing::{info, warn};

use crate::forecast::to_daily;
use crate::gateway::{GatewayError, WeatherGateway};
use crate::geolocate::Geolocator;
use crate::model::{Coordinates, CurrentConditions, DailySummary, Location, UnitSystem};

/// City used when no position fix can be obtained.
pub const DEFAULT_CITY: &str = "London";

pub const UNIT_SWITCH_FAILED: &str = "Failed to switch units";
pub const SEARCH_FAILED: &str = "Invalid city or API error.";

const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// The one mutable record behind the dashboard. `advisory` is a
/// non-fatal user-visible message and can coexist with valid data;
/// `loading` distinguishes "nothing to show yet" from an error.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub location: Option<Location>,
    pub units: UnitSystem,
    pub current: Option<CurrentConditions>,
    pub daily: Option<Vec<DailySummary>>,
    pub loading: bool,
    pub advisory: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn has_data(&self) -> bool {
        self.current.is_some()
    }
}

/// Drives the session through its transitions.
///
/// Every transition takes `&mut self`, so at most one can be in flight
/// at a time: a slow fetch from an earlier transition can never resolve
/// late and overwrite the result of a newer one. Callers that share the
/// orchestrator must do so through a single owning task.
#[derive(Debug)]
pub struct Orchestrator {
    gateway: Box<dyn WeatherGateway>,
    geolocator: Box<dyn Geolocator>,
    fallback_city: String,
    session: Session,
}

impl Orchestrator {
    pub fn new(gateway: Box<dyn WeatherGateway>, geolocator: Box<dyn Geolocator>) -> Self {
        Self {
            gateway,
            geolocator,
            fallback_city: DEFAULT_CITY.to_string(),
            session: Session::new(),
        }
    }

    /// Override the city used when geolocation fails.
    pub fn with_fallback_city(mut self, city: String) -> Self {
        self.fallback_city = city;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Startup transition: geolocate, fetch by coordinates, and on any
    /// failure along the way fall back to the fallback city by name
    /// ([`DEFAULT_CITY`] unless overridden).
    pub async fn initial_load(&mut self) {
        self.session.loading = true;
        self.run_initial_load().await;
        self.session.loading = false;
    }

    async fn run_initial_load(&mut self) {
        match self.geolocator.acquire(GEOLOCATION_TIMEOUT).await {
            Ok(coords) => match self.fetch_pair_by_coords(coords).await {
                Ok((current, daily)) => {
                    self.session.location = Some(Location::Coords(coords));
                    self.session.current = Some(current);
                    self.session.daily = Some(daily);
                    self.session.advisory = None;
                    return;
                }
                Err(err) => {
                    warn!(%err, city = %self.fallback_city, "coordinate fetch failed, falling back");
                }
            },
            Err(err) => {
                info!(%err, city = %self.fallback_city, "geolocation unavailable, falling back");
            }
        }

        let fallback = self.fallback_city.clone();
        match self.fetch_pair_by_city(&fallback).await {
            Ok((current, daily)) => {
                self.session.location = Some(Location::City(fallback.clone()));
                self.session.current = Some(current);
                self.session.daily = Some(daily);
                // Data loaded fine; the advisory only explains why the
                // user is looking at the fallback city.
                self.session.advisory =
                    Some(format!("Location permission denied. Showing {fallback}."));
            }
            Err(err) => {
                warn!(%err, "fallback fetch failed, no data to show");
                self.session.advisory = Some(err.to_string());
            }
        }
    }

    /// Re-fetch everything under a new unit system, through whichever
    /// locator last succeeded. On failure the stale-but-valid data stays
    /// visible and only the advisory changes.
    pub async fn change_units(&mut self, units: UnitSystem) {
        self.session.units = units;

        let Some(location) = self.session.location.clone() else {
            // Nothing fetched yet; the new unit applies from the first load.
            return;
        };

        self.session.loading = true;

        let fetched = match &location {
            Location::Coords(coords) => self.fetch_pair_by_coords(*coords).await,
            Location::City(name) => self.fetch_pair_by_city(name).await,
        };

        match fetched {
            Ok((current, daily)) => {
                self.session.current = Some(current);
                self.session.daily = Some(daily);
                self.session.advisory = None;
            }
            Err(err) => {
                warn!(%err, "refetch after unit change failed, keeping stale data");
                self.session.advisory = Some(UNIT_SWITCH_FAILED.to_string());
            }
        }

        self.session.loading = false;
    }

    /// Explicit city search. Empty input (after trimming) is ignored.
    /// On failure the previously displayed data stays untouched.
    pub async fn search(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }

        self.session.loading = true;
        self.session.advisory = None;

        match self.fetch_pair_by_city(city).await {
            Ok((current, daily)) => {
                self.session.location = Some(Location::City(city.to_string()));
                self.session.current = Some(current);
                self.session.daily = Some(daily);
            }
            Err(err) => {
                warn!(%err, city, "search failed, keeping prior data");
                self.session.advisory = Some(SEARCH_FAILED.to_string());
            }
        }

        self.session.loading = false;
    }

    // Current + forecast always travel together: the pair is fetched
    // concurrently, the first failure short-circuits the other, and
    // session state is only touched once both have succeeded.

    async fn fetch_pair_by_coords(
        &self,
        coords: Coordinates,
    ) -> Result<(CurrentConditions, Vec<DailySummary>), GatewayError> {
        let units = self.session.units;
        let (current, samples) = tokio::try_join!(
            self.gateway.current_by_coords(coords, units),
            self.gateway.forecast_by_coords(coords, units),
        )?;

        Ok((current, to_daily(&samples)))
    }

    async fn fetch_pair_by_city(
        &self,
        city: &str,
    ) -> Result<(CurrentConditions, Vec<DailySummary>), GatewayError> {
        let units = self.session.units;
        let (current, samples) = tokio::try_join!(
            self.gateway.current_by_city(city, units),
            self.gateway.forecast_by_city(city, units),
        )?;

        Ok((current, to_daily(&samples)))
    }
}
