use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use weather_core::{
    Config, Coordinate, FlakyPathMonitor, LiveLocationClient, LivePathMonitor, LiveWeatherClient,
    LocationClient, MockLocationClient, MockPathMonitor, MockWeatherClient, PathMonitorClient,
    WeatherClient,
};

use crate::app::AppViewModel;
use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Composable-dependency weather app")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the app: wire the selected client variants into the view
    /// model and render state as events arrive.
    Run {
        /// Locator variant to inject.
        #[arg(long, value_enum, default_value_t)]
        location: LocationVariant,

        /// Reachability variant to inject.
        #[arg(long, value_enum, default_value_t)]
        network: NetworkVariant,

        /// Weather backend variant to inject.
        #[arg(long, value_enum, default_value_t)]
        weather: WeatherVariant,
    },

    /// Fetch the forecast for a WOEID directly.
    Forecast {
        /// "Where On Earth ID" of the place.
        woeid: i64,
    },

    /// Search locations near a coordinate.
    Search {
        latitude: f64,
        longitude: f64,
    },

    /// Interactively edit the endpoints the live clients use.
    Configure,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum LocationVariant {
    #[default]
    Live,
    Authorized,
    NotDetermined,
    Denied,
    Failing,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum NetworkVariant {
    #[default]
    Live,
    Satisfied,
    Unsatisfied,
    Flaky,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum WeatherVariant {
    #[default]
    Live,
    Happy,
    Failing,
}

// `default_value_t` renders the default through Display.
impl std::fmt::Display for LocationVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_possible_value().ok_or(std::fmt::Error)?.get_name())
    }
}

impl std::fmt::Display for NetworkVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_possible_value().ok_or(std::fmt::Error)?.get_name())
    }
}

impl std::fmt::Display for WeatherVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_possible_value().ok_or(std::fmt::Error)?.get_name())
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Run { location, network, weather } => {
                let config = Config::load()?;
                run_app(&config, location, network, weather).await;
            }
            Command::Forecast { woeid } => {
                let config = Config::load()?;
                let client = LiveWeatherClient::from_config(&config);

                let response = client
                    .weather(woeid)
                    .await
                    .with_context(|| format!("Failed to fetch forecast for WOEID {woeid}"))?;

                for day in &response.consolidated_weather {
                    print!("{}", view::forecast_entry(day));
                }
            }
            Command::Search { latitude, longitude } => {
                let config = Config::load()?;
                let client = LiveWeatherClient::from_config(&config);

                let locations = client
                    .search_locations(Coordinate { latitude, longitude })
                    .await
                    .context("Location search failed")?;

                if locations.is_empty() {
                    println!("No locations found near {latitude},{longitude}");
                }
                for location in locations {
                    println!("{} (woeid {})", location.title, location.woeid);
                }
            }
            Command::Configure => {
                configure()?;
            }
        }

        Ok(())
    }
}

async fn run_app(
    config: &Config,
    location: LocationVariant,
    network: NetworkVariant,
    weather: WeatherVariant,
) {
    let location_client: Arc<dyn LocationClient> = match location {
        LocationVariant::Live => Arc::new(LiveLocationClient::from_config(config)),
        LocationVariant::Authorized => Arc::new(MockLocationClient::authorized_when_in_use()),
        LocationVariant::NotDetermined => Arc::new(MockLocationClient::not_determined()),
        LocationVariant::Denied => Arc::new(MockLocationClient::denied()),
        LocationVariant::Failing => Arc::new(MockLocationClient::failing()),
    };

    let path_monitor_client: Box<dyn PathMonitorClient> = match network {
        NetworkVariant::Live => Box::new(LivePathMonitor::from_config(config)),
        NetworkVariant::Satisfied => Box::new(MockPathMonitor::satisfied()),
        NetworkVariant::Unsatisfied => Box::new(MockPathMonitor::unsatisfied()),
        NetworkVariant::Flaky => Box::new(FlakyPathMonitor::new(Duration::from_secs(2))),
    };

    let weather_client: Arc<dyn WeatherClient> = match weather {
        WeatherVariant::Live => Arc::new(LiveWeatherClient::from_config(config)),
        WeatherVariant::Happy => Arc::new(MockWeatherClient::happy_path()),
        WeatherVariant::Failing => Arc::new(MockWeatherClient::failing()),
    };

    let mut view_model =
        AppViewModel::new(location_client, path_monitor_client.as_ref(), weather_client);

    // The app starts with an implicit "locate me" tap.
    view_model.location_button_tapped();

    view::render(&view_model);
    view_model.run(view::render).await;
}

fn configure() -> anyhow::Result<()> {
    let current = Config::load()?;

    let weather_base_url = inquire::Text::new("Weather API base URL:")
        .with_initial_value(&current.weather_base_url)
        .prompt()?;

    let probe_addr = inquire::Text::new("Connectivity probe address (host:port):")
        .with_initial_value(&current.probe_addr)
        .prompt()?;

    let probe_interval_secs = inquire::Text::new("Probe interval (seconds):")
        .with_initial_value(&current.probe_interval_secs.to_string())
        .prompt()?
        .parse::<u64>()
        .context("Probe interval must be a whole number of seconds")?;

    let geolocation_url = inquire::Text::new("Geolocation endpoint:")
        .with_initial_value(&current.geolocation_url)
        .prompt()?;

    let config = Config {
        weather_base_url,
        probe_addr,
        probe_interval_secs,
        geolocation_url,
    };
    config.save()?;

    println!("Saved {}", Config::config_file_path()?.display());
    Ok(())
}
