use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{Password, Text};
use tracing::info;
use weatherboard_core::{Config, OpenWeatherClient, load_dashboard, present::POPULAR_CITIES};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherboard", version, about = "Weather dashboard in the terminal")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default city.
    Configure,

    /// Show current weather and forecast for a city.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,

        /// Print the dashboard as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List popular cities.
    Cities,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Show { city, json } => show(city, json).await?,
            Command::Cities => {
                for city in POPULAR_CITIES {
                    println!("{city}");
                }
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    }

    let city = Text::new("Default city:")
        .with_default(config.city_or_default())
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(&city);

    config.save()?;
    info!(path = %Config::config_file_path()?.display(), "configuration saved");
    println!("Configuration saved.");

    Ok(())
}

async fn show(city: Option<String>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let city = city.unwrap_or_else(|| config.city_or_default().to_string());

    let client = OpenWeatherClient::from_config(&config)?;
    let dashboard = load_dashboard(&client, &city)
        .await
        .with_context(|| format!("Failed to load weather for '{}'", city.trim()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print!("{}", render::dashboard(&dashboard));
    }

    Ok(())
}
