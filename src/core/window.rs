//! View modes and the window each one exposes.

use crate::core::error::SeriesError;
use crate::core::interpolate::fill_monthly_gaps;
use crate::core::price::{AlignedPoint, Dated};
use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Trailing year of raw aligned observations.
    Recent,
    /// Whole range at monthly resolution, gaps interpolated.
    #[default]
    Full,
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ViewMode::Recent => "monthly",
                ViewMode::Full => "yearly",
            }
        )
    }
}

impl FromStr for ViewMode {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" | "recent" => Ok(ViewMode::Recent),
            "yearly" | "full" => Ok(ViewMode::Full),
            _ => Err(SeriesError::InvalidViewMode(s.to_string())),
        }
    }
}

/// Earliest date inside the recent window: one calendar year before `reference`.
pub fn recent_cutoff(reference: NaiveDate) -> NaiveDate {
    reference
        .checked_sub_months(Months::new(12))
        .or_else(|| reference.checked_sub_signed(Duration::days(365)))
        .unwrap_or(NaiveDate::MIN)
}

/// Points dated on or after [`recent_cutoff`]. The boundary day is included.
pub fn recent_window<T: Dated + Clone>(points: &[T], reference: NaiveDate) -> Vec<T> {
    let cutoff = recent_cutoff(reference);
    points
        .iter()
        .filter(|p| p.date() >= cutoff)
        .cloned()
        .collect()
}

/// The slice of `aligned` a chart in `mode` should show.
pub fn select_window(
    mode: ViewMode,
    aligned: &[AlignedPoint],
    reference: NaiveDate,
) -> Vec<AlignedPoint> {
    match mode {
        ViewMode::Recent => recent_window(aligned, reference),
        ViewMode::Full => fill_monthly_gaps(aligned),
    }
}
