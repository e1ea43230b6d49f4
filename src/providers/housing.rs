use crate::core::city::City;
use crate::core::error::SeriesError;
use crate::core::price::{PricePoint, TimeSeries};
use crate::core::series::price_as_of;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Monthly prices per year, January first. A year may be incomplete.
pub type YearlyPrices = BTreeMap<i32, Vec<f64>>;

pub type HousingDataset = BTreeMap<City, YearlyPrices>;

/// Read-only access to the static housing price dataset.
#[derive(Debug, Clone)]
pub struct HousingPrices {
    data: HousingDataset,
}

impl HousingPrices {
    pub fn new(data: HousingDataset) -> Self {
        Self { data }
    }

    /// Cities that have at least one observation.
    pub fn cities(&self) -> Vec<City> {
        self.data
            .iter()
            .filter(|(_, years)| years.values().any(|months| !months.is_empty()))
            .map(|(city, _)| *city)
            .collect()
    }

    /// Flattens the year/month table into one series dated `YYYY-MM-01`.
    pub fn history(&self, city: City) -> Result<TimeSeries, SeriesError> {
        let series: TimeSeries = self
            .data
            .get(&city)
            .into_iter()
            .flat_map(|years| years.iter())
            .flat_map(|(year, months)| {
                months.iter().enumerate().filter_map(move |(index, price)| {
                    NaiveDate::from_ymd_opt(*year, index as u32 + 1, 1)
                        .map(|date| PricePoint::new(date, *price))
                })
            })
            .collect();

        if series.is_empty() {
            return Err(SeriesError::empty(city.slug()));
        }
        Ok(series)
    }

    /// Latest price on or before `reference` for every city that has one.
    pub fn prices_as_of(&self, reference: NaiveDate) -> Vec<(City, f64)> {
        let mut prices = Vec::new();
        let mut skipped = Vec::new();
        for city in self.cities() {
            match self.history(city).map(|h| price_as_of(&h, reference)) {
                Ok(Some(price)) => prices.push((city, price)),
                _ => skipped.push(city.slug()),
            }
        }

        if !skipped.is_empty() {
            debug!(
                %reference,
                ?skipped,
                "Skipped cities without a price on or before the reference date"
            );
        }
        prices
    }
}
