//! Error taxonomy for the series engine.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// A series had no observations where at least one was required.
    #[error("{series} series is empty")]
    EmptySeries { series: String },

    /// A price that must divide another was zero or negative.
    #[error("non-positive price {price} on {date}")]
    NonPositivePrice { date: NaiveDate, price: f64 },

    /// A price was NaN or infinite.
    #[error("non-finite price on {date}")]
    NonFinitePrice { date: NaiveDate },

    #[error("City not found: {0}")]
    UnknownCity(String),

    #[error("Invalid view mode: {0}")]
    InvalidViewMode(String),
}

impl SeriesError {
    pub fn empty(series: &str) -> Self {
        SeriesError::EmptySeries {
            series: series.to_string(),
        }
    }
}
