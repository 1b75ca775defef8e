use serde::Serialize;
use thiserror::Error;

/// Assumptions for one projection. Rates are annual percents (6.5 means 6.5%),
/// amounts are currency units, durations are whole years.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub home_price: f64,
    pub down_payment: f64,
    pub mortgage_rate: f64,
    pub mortgage_term: u32,
    pub home_appreciation_rate: f64,
    pub initial_rent: f64,
    pub rent_increase_rate: f64,
    pub investment_return_rate: f64,
    pub time_horizon: u32,
    pub closing_costs_percent: f64,
    pub selling_costs_percent: f64,
    pub annual_ownership_cost_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPoint {
    pub year: u32,
    pub buy_net_worth: f64,
    pub rent_net_worth: f64,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Buy,
    Rent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub years: Vec<YearPoint>,
    pub final_buy_net_worth: f64,
    pub final_rent_net_worth: f64,
    pub difference: f64,
    pub winner: Winner,
    pub breakeven_year: Option<u32>,
    pub monthly_payment: f64,
    pub monthly_ownership_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} must be >= 0, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("{field} must be > -100, got {value}")]
    RateBelowFloor { field: &'static str, value: f64 },
    #[error("mortgageTerm must be at least 1 year")]
    ZeroMortgageTerm,
    #[error("{field} must be at most {max} years, got {value}")]
    DurationTooLong {
        field: &'static str,
        value: u32,
        max: u32,
    },
    #[error("downPayment ({down_payment}) cannot exceed homePrice ({home_price})")]
    DownPaymentExceedsPrice { down_payment: f64, home_price: f64 },
}
