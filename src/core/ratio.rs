//! Housing price expressed in bitcoins.

use crate::core::error::SeriesError;
use crate::core::price::{AlignedPoint, RatioPoint};
use chrono::NaiveDate;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Ratio series plus the headline value at its latest point.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioSeries {
    pub points: Vec<RatioPoint>,
    pub current_ratio: f64,
}

/// Rounds to two decimals, halves away from zero.
pub fn round_to_cents(value: f64) -> Option<f64> {
    Decimal::from_f64(value)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
}

/// `housing / bitcoin` rounded to two decimals.
///
/// Rejects a non-positive or non-finite Bitcoin price and a negative or
/// non-finite housing price instead of producing infinities or NaN.
pub fn ratio(housing: f64, bitcoin: f64, date: NaiveDate) -> Result<f64, SeriesError> {
    if !housing.is_finite() || !bitcoin.is_finite() {
        return Err(SeriesError::NonFinitePrice { date });
    }
    if bitcoin <= 0.0 {
        return Err(SeriesError::NonPositivePrice {
            date,
            price: bitcoin,
        });
    }
    if housing < 0.0 {
        return Err(SeriesError::NonPositivePrice {
            date,
            price: housing,
        });
    }

    round_to_cents(housing / bitcoin).ok_or(SeriesError::NonFinitePrice { date })
}

/// Derives one ratio per aligned point. Any bad point fails the whole series.
pub fn derive_ratios(points: &[AlignedPoint]) -> Result<RatioSeries, SeriesError> {
    let points = points
        .iter()
        .map(|p| {
            Ok(RatioPoint {
                date: p.date,
                ratio: ratio(p.housing_price, p.bitcoin_price, p.date)?,
            })
        })
        .collect::<Result<Vec<_>, SeriesError>>()?;

    let current_ratio = points
        .last()
        .map(|p| p.ratio)
        .ok_or_else(|| SeriesError::empty("ratio"))?;

    Ok(RatioSeries {
        points,
        current_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn point(d: &str, bitcoin: f64, housing: f64) -> AlignedPoint {
        AlignedPoint {
            date: date(d),
            bitcoin_price: bitcoin,
            housing_price: housing,
        }
    }

    #[test]
    fn test_ratio_rounding() {
        let d = date("2024-06-15");
        assert_eq!(ratio(1_000_000.0, 50_000.0, d).unwrap(), 20.00);
        assert_eq!(ratio(1_000_000.0, 30_000.0, d).unwrap(), 33.33);
        assert_eq!(ratio(1_000_000.0, 60_000.0, d).unwrap(), 16.67);
        // 0.125 is exact in binary, so this is a true midpoint
        assert_eq!(ratio(1.0, 8.0, d).unwrap(), 0.13);
        assert_eq!(ratio(0.0, 8.0, d).unwrap(), 0.0);
    }

    #[test]
    fn test_ratio_rejects_degenerate_bitcoin_price() {
        let d = date("2024-06-15");
        assert_eq!(
            ratio(1_000_000.0, 0.0, d),
            Err(SeriesError::NonPositivePrice { date: d, price: 0.0 })
        );
        assert_eq!(
            ratio(1_000_000.0, -5.0, d),
            Err(SeriesError::NonPositivePrice {
                date: d,
                price: -5.0
            })
        );
        assert_eq!(
            ratio(1_000_000.0, f64::NAN, d),
            Err(SeriesError::NonFinitePrice { date: d })
        );
        assert_eq!(
            ratio(f64::INFINITY, 50_000.0, d),
            Err(SeriesError::NonFinitePrice { date: d })
        );
    }

    #[test]
    fn test_derive_ratios_exposes_latest() {
        let series = derive_ratios(&[
            point("2024-04-01", 100_000.0, 1_000_000.0),
            point("2024-05-01", 80_000.0, 1_000_000.0),
        ])
        .unwrap();

        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].ratio, 10.0);
        assert_eq!(series.current_ratio, 12.5);
    }

    #[test]
    fn test_derive_ratios_fails_on_any_bad_point() {
        let result = derive_ratios(&[
            point("2024-04-01", 100_000.0, 1_000_000.0),
            point("2024-05-01", 0.0, 1_000_000.0),
        ]);
        assert!(matches!(
            result,
            Err(SeriesError::NonPositivePrice { price, .. }) if price == 0.0
        ));
    }

    #[test]
    fn test_derive_ratios_requires_points() {
        assert_eq!(derive_ratios(&[]), Err(SeriesError::empty("ratio")));
    }
}
