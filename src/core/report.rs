//! Per-city pipeline: normalise, align, window and derive ratios.

use crate::core::align::align;
use crate::core::city::City;
use crate::core::error::SeriesError;
use crate::core::price::{AlignedPoint, RatioPoint, TimeSeries};
use crate::core::ratio::derive_ratios;
use crate::core::series::{ensure_trailing, ensure_trailing_with, lookback};
use crate::core::window::{ViewMode, select_window};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Parameters chosen by the caller for one report.
#[derive(Debug, Clone, Copy)]
pub struct ReportRequest {
    pub city: City,
    pub mode: ViewMode,
    pub reference_date: NaiveDate,
    /// Look-back applied to both sources before alignment.
    pub history_days: u32,
}

/// Everything a chart of one city needs.
#[derive(Debug, Clone, Serialize)]
pub struct CityReport {
    pub city: City,
    pub mode: ViewMode,
    pub reference_date: NaiveDate,
    pub current_housing_price: f64,
    pub current_bitcoin_price: f64,
    pub current_ratio: f64,
    /// Raw aligned series over the whole look-back.
    pub aligned: Vec<AlignedPoint>,
    /// Dual price series for the requested view.
    pub prices: Vec<AlignedPoint>,
    /// Ratio series for the requested view.
    pub ratios: Vec<RatioPoint>,
    /// Housing observations without a matching Bitcoin month.
    pub dropped: usize,
}

/// Runs the whole pipeline for one city.
///
/// `bitcoin_quote` is the current Bitcoin price used as the trailing point of
/// the Bitcoin series; without it the last historical price is carried
/// forward.
pub fn build_report(
    request: &ReportRequest,
    housing: &TimeSeries,
    bitcoin: &TimeSeries,
    bitcoin_quote: Option<f64>,
) -> Result<CityReport, SeriesError> {
    let reference = request.reference_date;

    let housing = lookback(housing, reference, request.history_days);
    let housing = ensure_trailing(&housing, reference, request.city.slug())?;

    let bitcoin = lookback(bitcoin, reference, request.history_days);
    let bitcoin = match bitcoin_quote {
        Some(quote) => ensure_trailing_with(&bitcoin, reference, quote, "bitcoin")?,
        None => ensure_trailing(&bitcoin, reference, "bitcoin")?,
    };

    let alignment = align(&housing, &bitcoin);
    if alignment.points.is_empty() {
        return Err(SeriesError::empty("aligned"));
    }

    // validates every aligned point, not only those inside the window
    let full_ratios = derive_ratios(&alignment.points)?;

    let prices = select_window(request.mode, &alignment.points, reference);
    let ratios = derive_ratios(&prices)?;

    let current_housing_price = housing
        .last()
        .map(|p| p.price)
        .ok_or_else(|| SeriesError::empty(request.city.slug()))?;
    let current_bitcoin_price = bitcoin
        .last()
        .map(|p| p.price)
        .ok_or_else(|| SeriesError::empty("bitcoin"))?;

    debug!(
        city = %request.city,
        mode = %request.mode,
        aligned = alignment.points.len(),
        windowed = prices.len(),
        dropped = alignment.dropped,
        "Built city report"
    );

    Ok(CityReport {
        city: request.city,
        mode: request.mode,
        reference_date: reference,
        current_housing_price,
        current_bitcoin_price,
        current_ratio: full_ratios.current_ratio,
        aligned: alignment.points,
        prices,
        ratios: ratios.points,
        dropped: alignment.dropped,
    })
}
