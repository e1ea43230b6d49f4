//! Deposit and time-to-save estimates for a city's current housing price.

use crate::core::error::SeriesError;
use crate::core::ratio::{ratio, round_to_cents};
use chrono::NaiveDate;
use thiserror::Error;

/// Share of the house price required as a deposit.
pub const DEPOSIT_RATE: f64 = 0.20;
/// Share of the annual salary assumed to be saved each year.
pub const SAVINGS_RATE: f64 = 0.20;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AffordabilityError {
    #[error("Salary must be positive, got {0}")]
    NonPositiveSalary(f64),
    #[error("Savings must be a non-negative amount, got {0}")]
    InvalidSavings(f64),
    #[error(transparent)]
    Series(#[from] SeriesError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Affordability {
    pub house_price: f64,
    pub deposit: f64,
    /// Deposit expressed in bitcoins at `bitcoin_price`.
    pub deposit_btc: f64,
    pub bitcoin_price: f64,
    pub annual_saving: f64,
    pub years_to_save: u32,
}

/// Whole years needed to close the gap between `savings` and `deposit`.
pub fn years_to_save(deposit: f64, savings: f64, annual_saving: f64) -> u32 {
    let shortfall = deposit - savings;
    if shortfall <= 0.0 {
        return 0;
    }
    (shortfall / annual_saving).ceil() as u32
}

pub fn assess(
    house_price: f64,
    bitcoin_price: f64,
    salary: f64,
    savings: f64,
    date: NaiveDate,
) -> Result<Affordability, AffordabilityError> {
    if !salary.is_finite() || salary <= 0.0 {
        return Err(AffordabilityError::NonPositiveSalary(salary));
    }
    if !savings.is_finite() || savings < 0.0 {
        return Err(AffordabilityError::InvalidSavings(savings));
    }
    if !house_price.is_finite() {
        return Err(SeriesError::NonFinitePrice { date }.into());
    }

    let deposit = round_to_cents(house_price * DEPOSIT_RATE)
        .ok_or(SeriesError::NonFinitePrice { date })?;
    let deposit_btc = ratio(deposit, bitcoin_price, date)?;
    let annual_saving = salary * SAVINGS_RATE;

    Ok(Affordability {
        house_price,
        deposit,
        deposit_btc,
        bitcoin_price,
        annual_saving,
        years_to_save: years_to_save(deposit, savings, annual_saving),
    })
}
