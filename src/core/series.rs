//! Normalisation of raw price series ahead of alignment.

use crate::core::error::SeriesError;
use crate::core::price::{PricePoint, TimeSeries};
use chrono::{Days, NaiveDate};
use tracing::debug;

/// Guarantees the series ends on `reference`, carrying the last known price
/// forward when the latest observation is older.
///
/// A series whose last observation is on or after `reference` is returned
/// unchanged, so running this twice on the same day is a no-op.
pub fn ensure_trailing(
    series: &TimeSeries,
    reference: NaiveDate,
    name: &str,
) -> Result<TimeSeries, SeriesError> {
    let last = series.last().ok_or_else(|| SeriesError::empty(name))?;
    ensure_trailing_with(series, reference, last.price, name)
}

/// Like [`ensure_trailing`] but the appended point uses `price`, typically a
/// freshly quoted value that is newer than the last historical observation.
pub fn ensure_trailing_with(
    series: &TimeSeries,
    reference: NaiveDate,
    price: f64,
    name: &str,
) -> Result<TimeSeries, SeriesError> {
    let last = series.last().ok_or_else(|| SeriesError::empty(name))?;
    if !price.is_finite() {
        return Err(SeriesError::NonFinitePrice { date: reference });
    }

    if last.date >= reference {
        return Ok(series.clone());
    }

    debug!(
        series = name,
        last = %last.date,
        %reference,
        price,
        "Appending trailing observation"
    );
    let mut points = series.points().to_vec();
    points.push(PricePoint::new(reference, price));
    Ok(TimeSeries::new(points))
}

/// Keeps observations dated within `[reference - days, reference]`.
///
/// Observations after `reference` are ignored. The latest observation on or
/// before `reference` always survives so the last known price stays defined.
pub fn lookback(series: &TimeSeries, reference: NaiveDate, days: u32) -> TimeSeries {
    let cutoff = reference
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);
    let as_of: Vec<PricePoint> = series
        .iter()
        .filter(|p| p.date <= reference)
        .copied()
        .collect();
    let kept: Vec<PricePoint> = as_of.iter().filter(|p| p.date >= cutoff).copied().collect();

    if kept.is_empty() {
        return as_of.last().copied().into_iter().collect();
    }
    TimeSeries::new(kept)
}

/// Price of the latest observation on or before `reference`.
pub fn price_as_of(series: &TimeSeries, reference: NaiveDate) -> Option<f64> {
    series
        .iter()
        .take_while(|p| p.date <= reference)
        .last()
        .map(|p| p.price)
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_appends_today_with_last_price() {
        let input = series(&[("2024-04-01", 100.0), ("2024-05-01", 110.0)]);
        let out = ensure_trailing(&input, date("2024-06-15"), "housing").unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(*out.last().unwrap(), PricePoint::new(date("2024-06-15"), 110.0));
        // existing points untouched
        assert_eq!(&out.points()[..2], input.points());
    }

    #[test]
    fn test_idempotent_on_same_day() {
        let input = series(&[("2024-05-01", 110.0)]);
        let today = date("2024-06-15");
        let once = ensure_trailing(&input, today, "housing").unwrap();
        let twice = ensure_trailing(&once, today, "housing").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_append_when_already_current() {
        let input = series(&[("2024-06-15", 110.0)]);
        let out = ensure_trailing(&input, date("2024-06-15"), "housing").unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_future_dated_series_is_left_alone() {
        let input = series(&[("2024-07-01", 110.0)]);
        let out = ensure_trailing(&input, date("2024-06-15"), "housing").unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_empty_series_is_rejected() {
        let err = ensure_trailing(&TimeSeries::default(), date("2024-06-15"), "bitcoin")
            .unwrap_err();
        assert_eq!(err, SeriesError::empty("bitcoin"));
    }

    #[test]
    fn test_trailing_with_quote() {
        let input = series(&[("2024-05-01", 90_000.0)]);
        let out = ensure_trailing_with(&input, date("2024-06-15"), 95_500.0, "bitcoin").unwrap();
        assert_eq!(out.last().unwrap().price, 95_500.0);

        let err = ensure_trailing_with(&input, date("2024-06-15"), f64::NAN, "bitcoin");
        assert!(matches!(err, Err(SeriesError::NonFinitePrice { .. })));
    }

    #[test]
    fn test_lookback_trims_old_points() {
        let input = series(&[
            ("2020-01-01", 1.0),
            ("2023-07-01", 2.0),
            ("2024-06-01", 3.0),
        ]);
        let out = lookback(&input, date("2024-06-15"), 365);
        let dates: Vec<_> = out.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date("2023-07-01"), date("2024-06-01")]);
    }

    #[test]
    fn test_lookback_keeps_latest_point() {
        let input = series(&[("2020-01-01", 1.0), ("2021-01-01", 2.0)]);
        let out = lookback(&input, date("2024-06-15"), 30);
        assert_eq!(out.len(), 1);
        assert_eq!(out.last().unwrap().price, 2.0);
    }

    #[test]
    fn test_lookback_ignores_points_after_reference() {
        let input = series(&[
            ("2023-01-01", 1.0),
            ("2023-02-01", 2.0),
            ("2023-03-01", 3.0),
        ]);
        let out = lookback(&input, date("2023-02-10"), 365);
        assert_eq!(out.last().unwrap().price, 2.0);

        assert!(lookback(&input, date("2022-12-31"), 365).is_empty());
    }

    #[test]
    fn test_lookback_longer_than_calendar_keeps_everything() {
        let input = series(&[("1900-01-01", 1.0), ("2024-06-01", 2.0)]);
        let out = lookback(&input, date("2024-06-20"), u32::MAX);
        assert_eq!(out, input);
    }

    #[test]
    fn test_price_as_of() {
        let input = series(&[("2023-01-01", 1.0), ("2023-03-01", 3.0)]);
        assert_eq!(price_as_of(&input, date("2023-02-28")), Some(1.0));
        assert_eq!(price_as_of(&input, date("2023-03-01")), Some(3.0));
        assert_eq!(price_as_of(&input, date("2022-12-31")), None);
    }
}
