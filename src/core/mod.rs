//! Series engine and its ambient concerns

pub mod affordability;
pub mod align;
pub mod cache;
pub mod city;
pub mod config;
pub mod error;
pub mod interpolate;
pub mod log;
pub mod price;
pub mod ratio;
pub mod report;
pub mod series;
pub mod window;

// Re-export main types for cleaner imports
pub use city::City;
pub use error::SeriesError;
pub use price::{AlignedPoint, MonthKey, PricePoint, PriceSource, RatioPoint, TimeSeries};
pub use report::{CityReport, ReportRequest, build_report};
pub use window::ViewMode;
