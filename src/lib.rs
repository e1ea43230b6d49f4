pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::{cache, config, log};

use crate::core::affordability::assess;
use crate::core::cache::Cache;
use crate::core::config::AppConfig;
use crate::core::series::price_as_of;
use crate::core::{City, CityReport, ReportRequest, SeriesError, ViewMode, build_report};
use crate::providers::{BitcoinPrices, CoinGeckoProvider, HousingPrices, seed};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Latest housing price of every city plus the Bitcoin price.
    Prices,
    /// Housing price in BTC over time.
    Ratio {
        city: String,
        view: String,
        days: Option<u32>,
        json: bool,
    },
    /// Housing and Bitcoin prices side by side.
    Market {
        city: String,
        view: String,
        days: Option<u32>,
        json: bool,
    },
    /// Deposit and years-to-save estimate.
    Afford {
        city: String,
        salary: f64,
        savings: f64,
    },
}

/// Price sources shared by every command.
struct Sources {
    housing: HousingPrices,
    bitcoin: BitcoinPrices,
}

impl Sources {
    fn from_config(config: &AppConfig) -> Result<Self> {
        let coingecko = &config.providers.coingecko;
        let live = CoinGeckoProvider::new(coingecko, "bitcoin", &config.currency)?;
        let history = seed::load_bitcoin(config.data.bitcoin_path.as_deref())?;
        let bitcoin = BitcoinPrices::new(
            Arc::new(live),
            history,
            Cache::new(Duration::from_secs(coingecko.cache_ttl_secs)),
            Duration::from_secs(coingecko.timeout_secs),
        )?;
        let housing = HousingPrices::new(seed::load_housing(config.data.housing_path.as_deref())?);

        Ok(Sources { housing, bitcoin })
    }

    /// Live quote when looking at today, `None` for a past reference date so
    /// the pipeline only sees what was known back then.
    async fn bitcoin_quote(&self, reference: NaiveDate, today: NaiveDate) -> Option<f64> {
        if reference < today {
            debug!(%reference, "Past reference date, skipping live quote");
            return None;
        }
        let spinner = cli::ui::new_spinner("Fetching Bitcoin price...");
        let price = self.bitcoin.current_price().await;
        spinner.finish_and_clear();
        Some(price)
    }

    async fn bitcoin_price(&self, reference: NaiveDate, today: NaiveDate) -> Result<f64> {
        match self.bitcoin_quote(reference, today).await {
            Some(price) => Ok(price),
            None => Ok(price_as_of(self.bitcoin.history(), reference)
                .ok_or_else(|| SeriesError::empty("bitcoin"))?),
        }
    }

    async fn report(&self, request: &ReportRequest, today: NaiveDate) -> Result<CityReport> {
        let housing = self.housing.history(request.city)?;
        let quote = self.bitcoin_quote(request.reference_date, today).await;
        Ok(build_report(
            request,
            &housing,
            self.bitcoin.history(),
            quote,
        )?)
    }

    fn housing_price(&self, city: City, reference: NaiveDate) -> Result<f64> {
        let history = self.housing.history(city)?;
        Ok(price_as_of(&history, reference).ok_or_else(|| SeriesError::empty(city.slug()))?)
    }
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    reference: Option<NaiveDate>,
) -> Result<()> {
    info!("btc-housing starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let today = Utc::now().date_naive();
    let reference = reference.unwrap_or(today);
    let sources = Sources::from_config(&config)?;

    match command {
        AppCommand::Prices => {
            let bitcoin = sources.bitcoin_price(reference, today).await?;
            let housing = sources.housing.prices_as_of(reference);
            cli::prices::display(reference, bitcoin, &housing, &config.currency);
        }
        AppCommand::Ratio {
            city,
            view,
            days,
            json,
        } => {
            let request = chart_request(&city, &view, days, reference, &config)?;
            let report = sources.report(&request, today).await?;
            if json {
                cli::ui::print_json(&report)?;
            } else {
                cli::ratio::display(&report);
            }
        }
        AppCommand::Market {
            city,
            view,
            days,
            json,
        } => {
            let request = chart_request(&city, &view, days, reference, &config)?;
            let report = sources.report(&request, today).await?;
            if json {
                cli::ui::print_json(&report)?;
            } else {
                cli::market::display(&report, &config.currency);
            }
        }
        AppCommand::Afford {
            city,
            salary,
            savings,
        } => {
            let city: City = city.parse()?;
            let house_price = sources.housing_price(city, reference)?;
            let bitcoin = sources.bitcoin_price(reference, today).await?;
            let result = assess(house_price, bitcoin, salary, savings, reference)?;
            cli::afford::display(city, &result, savings, &config.currency);
        }
    }

    Ok(())
}

fn chart_request(
    city: &str,
    view: &str,
    days: Option<u32>,
    reference: NaiveDate,
    config: &AppConfig,
) -> Result<ReportRequest, SeriesError> {
    Ok(ReportRequest {
        city: city.parse()?,
        mode: view.parse::<ViewMode>()?,
        reference_date: reference,
        history_days: days.unwrap_or(config.history_days),
    })
}
