use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Select, Text};
use std::convert::TryFrom;

use skycast_core::{Config, IpGeolocator, OpenWeatherGateway, Orchestrator, UnitSystem};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key in the user config.
    Configure,

    /// Show the dashboard (the default when no subcommand is given).
    Dashboard {
        /// Start from a city instead of geolocating.
        #[arg(long)]
        city: Option<String>,

        /// Initial unit system: "metric" or "imperial".
        #[arg(long)]
        units: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Dashboard {
            city: None,
            units: None,
        }) {
            Command::Configure => configure(),
            Command::Dashboard { city, units } => dashboard(city, units).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Reading the API key was cancelled")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn dashboard(city: Option<String>, units: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_key = config.resolve_api_key()?;

    let gateway = Box::new(OpenWeatherGateway::new(api_key));
    let geolocator = Box::new(IpGeolocator::new());
    let mut orch = Orchestrator::new(gateway, geolocator)
        .with_fallback_city(config.default_city().to_string());

    // Before anything is loaded this only records the preference.
    if let Some(units) = units.as_deref() {
        orch.change_units(UnitSystem::try_from(units)?).await;
    }

    match city {
        Some(city) => orch.search(&city).await,
        None => orch.initial_load().await,
    }

    loop {
        render::dashboard(orch.session());

        let toggle = format!("Switch to {}", orch.session().units.toggled());
        let options = vec!["Search city", toggle.as_str(), "Quit"];

        let choice = match Select::new("What next?", options).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if choice == "Search city" {
            match Text::new("City:").prompt() {
                Ok(city) => orch.search(&city).await,
                Err(InquireError::OperationCanceled) => continue,
                Err(InquireError::OperationInterrupted) => break,
                Err(err) => return Err(err.into()),
            }
        } else if choice == toggle {
            let next = orch.session().units.toggled();
            orch.change_units(next).await;
        } else {
            break;
        }
    }

    Ok(())
}
