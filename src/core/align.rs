//! Joins a housing series onto a Bitcoin series by calendar month.

use crate::core::price::{AlignedPoint, MonthKey, TimeSeries};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alignment {
    pub points: Vec<AlignedPoint>,
    /// Housing observations whose month had no Bitcoin price.
    pub dropped: usize,
}

/// Emits one [`AlignedPoint`] per housing observation whose month also has a
/// Bitcoin price. Unmatched housing observations are dropped and counted.
///
/// When the Bitcoin series holds several prices in one month the latest one
/// is used.
pub fn align(housing: &TimeSeries, bitcoin: &TimeSeries) -> Alignment {
    let bitcoin_by_month: HashMap<MonthKey, f64> = bitcoin
        .iter()
        .map(|p| (MonthKey::from_date(p.date), p.price))
        .collect();

    let mut alignment = Alignment::default();
    for house in housing {
        match bitcoin_by_month.get(&MonthKey::from_date(house.date)) {
            Some(&bitcoin_price) => alignment.points.push(AlignedPoint {
                date: house.date,
                bitcoin_price,
                housing_price: house.price,
            }),
            None => alignment.dropped += 1,
        }
    }

    if alignment.dropped > 0 {
        debug!(
            dropped = alignment.dropped,
            kept = alignment.points.len(),
            "Dropped housing months without a Bitcoin price"
        );
    }
    alignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::price::PricePoint;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series(points: &[(&str, f64)]) -> TimeSeries {
        points
            .iter()
            .map(|(d, p)| PricePoint::new(date(d), *p))
            .collect()
    }

    #[test]
    fn test_unmatched_housing_month_is_dropped() {
        let housing = series(&[
            ("2021-01-01", 900_000.0),
            ("2021-02-01", 910_000.0),
            ("2021-04-01", 930_000.0),
        ]);
        let bitcoin = series(&[
            ("2021-01-01", 40_000.0),
            ("2021-02-01", 45_000.0),
            ("2021-03-01", 70_000.0),
        ]);

        let alignment = align(&housing, &bitcoin);

        assert_eq!(
            alignment.points,
            vec![
                AlignedPoint {
                    date: date("2021-01-01"),
                    bitcoin_price: 40_000.0,
                    housing_price: 900_000.0,
                },
                AlignedPoint {
                    date: date("2021-02-01"),
                    bitcoin_price: 45_000.0,
                    housing_price: 910_000.0,
                },
            ]
        );
        assert_eq!(alignment.dropped, 1);
    }

    #[test]
    fn test_join_ignores_day_of_month() {
        let housing = series(&[("2021-01-01", 900_000.0), ("2021-01-31", 905_000.0)]);
        let bitcoin = series(&[("2021-01-15", 40_000.0)]);

        let alignment = align(&housing, &bitcoin);
        assert_eq!(alignment.points.len(), 2);
        assert!(alignment.points.iter().all(|p| p.bitcoin_price == 40_000.0));
        assert_eq!(alignment.dropped, 0);
    }

    #[test]
    fn test_latest_bitcoin_price_in_month_wins() {
        let housing = series(&[("2024-06-01", 1_000_000.0)]);
        let bitcoin = series(&[("2024-06-01", 90_000.0), ("2024-06-15", 95_000.0)]);

        let alignment = align(&housing, &bitcoin);
        assert_eq!(alignment.points[0].bitcoin_price, 95_000.0);
    }

    #[test]
    fn test_output_is_ordered_without_duplicates() {
        let housing = series(&[
            ("2021-03-01", 3.0),
            ("2021-01-01", 1.0),
            ("2021-02-01", 2.0),
        ]);
        let bitcoin = series(&[
            ("2021-01-01", 1.0),
            ("2021-02-01", 1.0),
            ("2021-03-01", 1.0),
        ]);

        let alignment = align(&housing, &bitcoin);
        let dates: Vec<_> = alignment.points.iter().map(|p| p.date).collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_inputs() {
        let alignment = align(&TimeSeries::default(), &series(&[("2021-01-01", 1.0)]));
        assert!(alignment.points.is_empty());
        assert_eq!(alignment.dropped, 0);

        let alignment = align(&series(&[("2021-01-01", 1.0)]), &TimeSeries::default());
        assert!(alignment.points.is_empty());
        assert_eq!(alignment.dropped, 1);
    }
}
