use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use codis_core::{Config, DownloadResult, Fetcher, HttpTransport, StaticToken};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "codis", version, about = "CODiS historical station-data downloader")]
pub struct Cli {
    /// Session cookie to use for this run, overriding the configured one.
    #[arg(long, global = true)]
    pub cookie: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the CODiS session cookie for later runs.
    Configure,

    /// Download one month of observations for a station.
    Monthly {
        /// Station id, e.g. "466920".
        station_id: String,

        /// Month to download as 'YYYY-MM-DD'; the day part is ignored.
        date: String,

        /// Directory the JSON file is written into (created if missing).
        output_dir: PathBuf,
    },

    /// Download one year of observations for a station.
    Yearly {
        /// Station id, e.g. "466920".
        station_id: String,

        /// Year to download as 'YYYY'.
        year: String,

        /// Directory the JSON file is written into (created if missing).
        output_dir: PathBuf,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Monthly { station_id, date, output_dir } => {
                println!("[*] Downloading monthly data for station {station_id} ({date})...");
                let fetcher = build_fetcher(self.cookie)?;
                report(fetcher.fetch_monthly(&station_id, &date, &output_dir))
            }
            Command::Yearly { station_id, year, output_dir } => {
                println!("[*] Downloading yearly data for station {station_id} ({year})...");
                let fetcher = build_fetcher(self.cookie)?;
                report(fetcher.fetch_yearly(&station_id, &year, &output_dir))
            }
        }
    }
}

/// Wire up the fetcher: an explicit `--cookie` wins, otherwise the cookie
/// comes from the config file.
fn build_fetcher(cookie: Option<String>) -> Result<Fetcher> {
    match cookie {
        Some(value) => Ok(Fetcher::new(
            Box::new(StaticToken::new(value)),
            Box::new(HttpTransport::new()?),
        )),
        None => Fetcher::from_config(),
    }
}

/// Prompt for a fresh session cookie and persist it.
fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let cookie = inquire::Text::new("Session cookie:")
        .with_help_message("Copy the Cookie header from a logged-in codis.cwa.gov.tw browser tab")
        .prompt()
        .context("Cookie prompt was cancelled")?;

    config.set_session_cookie(cookie.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Surface the result reason verbatim; exit code 1 on failure so scripts can
/// decide whether to retry.
fn report(result: DownloadResult) -> Result<()> {
    if result.success {
        match &result.path {
            Some(path) => println!("[+] {}: {}", result.reason, path.display()),
            None => println!("[+] {}", result.reason),
        }
        Ok(())
    } else {
        eprintln!("[!] {}", result.reason);
        std::process::exit(1);
    }
}
