//! Static seed datasets, embedded at build time or read from disk.

use crate::core::price::{PricePoint, TimeSeries};
use crate::providers::housing::HousingDataset;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use tracing::debug;

const HOUSE_PRICES: &str = include_str!("../../data/house_prices.yaml");
const BITCOIN_PRICES: &str = include_str!("../../data/bitcoin_prices.yaml");

#[derive(Debug, Deserialize)]
struct BitcoinRecord {
    date: NaiveDate,
    price: f64,
}

fn read_or_embedded(path: Option<&str>, embedded: &'static str) -> Result<String> {
    match path {
        Some(path) => {
            debug!("Reading seed data from {}", path);
            fs::read_to_string(path).with_context(|| format!("Failed to read seed data: {path}"))
        }
        None => Ok(embedded.to_string()),
    }
}

/// Parses a housing dataset: `city -> year -> [monthly prices]`.
pub fn parse_housing(yaml: &str) -> Result<HousingDataset> {
    let data: HousingDataset =
        serde_yaml::from_str(yaml).context("Failed to parse housing price data")?;

    for (city, years) in &data {
        for (year, months) in years {
            if months.len() > 12 {
                bail!("{city} {year} has {} monthly prices, expected at most 12", months.len());
            }
            if let Some(price) = months.iter().find(|p| !p.is_finite() || **p < 0.0) {
                bail!("{city} {year} has an invalid price: {price}");
            }
        }
    }
    Ok(data)
}

/// Parses a Bitcoin history: a list of `{date, price}` records.
///
/// Every price must be strictly positive since it later divides housing prices.
pub fn parse_bitcoin(yaml: &str) -> Result<TimeSeries> {
    let records: Vec<BitcoinRecord> =
        serde_yaml::from_str(yaml).context("Failed to parse bitcoin price data")?;

    if let Some(bad) = records.iter().find(|r| !r.price.is_finite() || r.price <= 0.0) {
        bail!("Bitcoin price on {} must be positive, got {}", bad.date, bad.price);
    }
    if records.is_empty() {
        bail!("Bitcoin price data is empty");
    }

    Ok(records
        .into_iter()
        .map(|r| PricePoint::new(r.date, r.price))
        .collect())
}

pub fn load_housing(path: Option<&str>) -> Result<HousingDataset> {
    parse_housing(&read_or_embedded(path, HOUSE_PRICES)?)
}

pub fn load_bitcoin(path: Option<&str>) -> Result<TimeSeries> {
    parse_bitcoin(&read_or_embedded(path, BITCOIN_PRICES)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::city::City;
    use std::io::Write;

    #[test]
    fn test_embedded_datasets_are_valid() {
        let housing = load_housing(None).unwrap();
        for city in City::ALL {
            assert!(housing.contains_key(&city), "missing {city}");
        }

        let bitcoin = load_bitcoin(None).unwrap();
        assert!(bitcoin.len() > 24);
        assert!(bitcoin.iter().all(|p| p.price > 0.0));
    }

    #[test]
    fn test_parse_housing() {
        let yaml = r#"
sydney:
  2023: [1000000, 1010000]
melbourne:
  2022: [800000]
"#;
        let data = parse_housing(yaml).unwrap();
        assert_eq!(data[&City::Sydney][&2023], vec![1_000_000.0, 1_010_000.0]);
        assert_eq!(data[&City::Melbourne][&2022], vec![800_000.0]);
    }

    #[test]
    fn test_parse_housing_rejects_unknown_city_and_long_years() {
        assert!(parse_housing("gotham:\n  2023: [1]\n").is_err());

        let thirteen = format!("sydney:\n  2023: [{}]\n", vec!["1"; 13].join(", "));
        let err = parse_housing(&thirteen).unwrap_err();
        assert!(err.to_string().contains("expected at most 12"));

        assert!(parse_housing("sydney:\n  2023: [-1]\n").is_err());
    }

    #[test]
    fn test_parse_bitcoin_rejects_non_positive_prices() {
        let err = parse_bitcoin("- date: 2021-01-01\n  price: 0\n").unwrap_err();
        assert!(err.to_string().contains("must be positive"));

        assert!(parse_bitcoin("[]").is_err());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "- date: 2021-02-01\n  price: 60000\n- date: 2021-01-01\n  price: 50000"
        )
        .unwrap();

        let series = load_bitcoin(file.path().to_str()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.first().unwrap().price, 50_000.0);

        assert!(load_bitcoin(Some("/no/such/file.yaml")).is_err());
    }
}
