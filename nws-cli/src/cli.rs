use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use nws_core::{Config, Gateway, ToolArgs, resources::resource_list, server};
use std::path::{Path, PathBuf};

use crate::display;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "nws-gateway",
    version,
    about = "US weather gateway backed by api.weather.gov"
)]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP gateway.
    Serve {
        /// Listen address, overriding the configured one.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Look up weather once and print it.
    Show {
        /// US city, state or zip, e.g. "Boston,MA".
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        location: Option<String>,

        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// "today", "tomorrow", a weekday name or YYYY-MM-DD.
        #[arg(long)]
        date: Option<String>,

        /// Print the raw response envelope.
        #[arg(long)]
        json: bool,
    },

    /// Print the resource descriptors served at /resources.
    Resources,

    /// Interactively edit the configuration file.
    Configure,
}

impl Cli {
    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_file_path(),
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let path = self.config_path()?;
        tracing::debug!("Using config file {}", path.display());

        match self.command {
            Command::Serve { bind } => {
                let config = Config::load_from(&path)?;
                let bind = bind.unwrap_or_else(|| config.bind.clone());
                let gateway = Gateway::from_config(&config)?;
                server::serve(&bind, gateway).await?;
            }
            Command::Show {
                location,
                lat,
                lon,
                date,
                json,
            } => {
                let config = Config::load_from(&path)?;
                let gateway = Gateway::from_config(&config)?;
                let args = ToolArgs {
                    location,
                    lat,
                    lon,
                    date,
                };
                let envelope = gateway.call_tool(&args).await;

                if json {
                    let out = serde_json::to_string_pretty(&envelope)
                        .context("Failed to serialize response envelope")?;
                    println!("{out}");
                } else {
                    println!("{}", display::render(&envelope));
                }

                if !envelope.is_ok() {
                    return Err(anyhow!("{}", envelope.message));
                }
            }
            Command::Resources => {
                let out = serde_json::to_string_pretty(&resource_list())
                    .context("Failed to serialize resource list")?;
                println!("{out}");
            }
            Command::Configure => configure(&path)?,
        }

        Ok(())
    }
}

fn configure(path: &Path) -> anyhow::Result<()> {
    let current = Config::load_from(path)?;

    let nws_base_url = Text::new("NWS API base URL:")
        .with_default(&current.nws_base_url)
        .prompt()?;
    let geocoder_url = Text::new("Geocoder search URL:")
        .with_default(&current.geocoder_url)
        .prompt()?;
    let user_agent = Text::new("User-Agent (include a contact address):")
        .with_default(&current.user_agent)
        .prompt()?;
    let timeout_secs = CustomType::<u64>::new("Upstream timeout in seconds:")
        .with_default(current.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;
    let bind = Text::new("HTTP listen address:")
        .with_default(&current.bind)
        .prompt()?;

    let config = Config {
        nws_base_url,
        geocoder_url,
        user_agent,
        timeout_secs,
        bind,
    };
    config.validate()?;
    config.save_to(path)?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn show_accepts_negative_longitude() {
        let cli = Cli::parse_from([
            "nws-gateway",
            "show",
            "--lat",
            "42.36",
            "--lon",
            "-71.06",
            "--date",
            "today",
        ]);
        match cli.command {
            Command::Show { lat, lon, date, .. } => {
                assert_eq!(lat, Some(42.36));
                assert_eq!(lon, Some(-71.06));
                assert_eq!(date.as_deref(), Some("today"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_rejects_name_with_coordinates() {
        let res = Cli::try_parse_from([
            "nws-gateway",
            "show",
            "--location",
            "Boston",
            "--lat",
            "1",
            "--lon",
            "2",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn global_config_flag() {
        let cli = Cli::parse_from(["nws-gateway", "resources", "--config", "/tmp/nws.toml"]);
        let expected = PathBuf::from("/tmp/nws.toml");
        assert_eq!(cli.config_path().unwrap(), expected);
    }
}
