use super::amortization::{monthly_payment, remaining_balance};
use super::types::{InputError, Inputs, ProjectionResult, Winner, YearPoint};

/// Longest mortgage term or comparison horizon the engine accepts. Keeps
/// `years * 12` far from u32 range and the output series allocation small.
pub const MAX_PROJECTION_YEARS: u32 = 1_000;

/// Amortized debt service plus prorated recurring costs (taxes, insurance,
/// maintenance), as one comparable monthly "cost of staying in this home".
pub fn monthly_ownership_cost(
    home_price: f64,
    annual_ownership_cost_percent: f64,
    payment: f64,
) -> f64 {
    payment + home_price * annual_ownership_cost_percent / 100.0 / 12.0
}

fn validate(inputs: &Inputs) -> Result<(), InputError> {
    for (field, value) in [
        ("homePrice", inputs.home_price),
        ("downPayment", inputs.down_payment),
        ("initialRent", inputs.initial_rent),
        ("mortgageRate", inputs.mortgage_rate),
        ("closingCostsPercent", inputs.closing_costs_percent),
        ("sellingCostsPercent", inputs.selling_costs_percent),
        (
            "annualOwnershipCostPercent",
            inputs.annual_ownership_cost_percent,
        ),
    ] {
        if !value.is_finite() {
            return Err(InputError::NonFinite { field });
        }
        if value < 0.0 {
            return Err(InputError::NegativeAmount { field, value });
        }
    }

    // Zero or negative growth rates are valid limiting cases, but a rate at or
    // below -100% would flip the sign of a compounding base.
    for (field, value) in [
        ("homeAppreciationRate", inputs.home_appreciation_rate),
        ("rentIncreaseRate", inputs.rent_increase_rate),
        ("investmentReturnRate", inputs.investment_return_rate),
    ] {
        if !value.is_finite() {
            return Err(InputError::NonFinite { field });
        }
        if value <= -100.0 {
            return Err(InputError::RateBelowFloor { field, value });
        }
    }

    if inputs.mortgage_term == 0 {
        return Err(InputError::ZeroMortgageTerm);
    }

    for (field, value) in [
        ("mortgageTerm", inputs.mortgage_term),
        ("timeHorizon", inputs.time_horizon),
    ] {
        if value > MAX_PROJECTION_YEARS {
            return Err(InputError::DurationTooLong {
                field,
                value,
                max: MAX_PROJECTION_YEARS,
            });
        }
    }

    if inputs.down_payment > inputs.home_price {
        return Err(InputError::DownPaymentExceedsPrice {
            down_payment: inputs.down_payment,
            home_price: inputs.home_price,
        });
    }

    Ok(())
}

/// Projects buy and rent net worth for years 0..=time_horizon and reduces the
/// two trajectories to a verdict at the horizon. Pure: no state survives the
/// call, and identical inputs always produce identical results.
///
/// Selling costs are realized in whichever year is terminal, so a
/// `time_horizon` of 0 reports a buy position already net of both closing and
/// selling costs.
///
/// Intermediate compounding is carried in full f64 precision; values are
/// rounded to whole currency units (and floor-clamped at zero) only when they
/// enter the output series.
pub fn project(inputs: &Inputs) -> Result<ProjectionResult, InputError> {
    validate(inputs)?;

    let loan_amount = (inputs.home_price - inputs.down_payment).max(0.0);
    let monthly_rate = inputs.mortgage_rate / 100.0 / 12.0;
    let num_payments = inputs.mortgage_term * 12;
    let payment = monthly_payment(loan_amount, monthly_rate, num_payments);
    let total_monthly_cost =
        monthly_ownership_cost(inputs.home_price, inputs.annual_ownership_cost_percent, payment);

    // Closing costs are realized once, at year 0; recurring non-debt costs
    // accrue per completed year on the purchase price.
    let closing_cost = inputs.home_price * inputs.closing_costs_percent / 100.0;
    let annual_extra_cost = inputs.home_price * inputs.annual_ownership_cost_percent / 100.0;

    let appreciation_growth = 1.0 + inputs.home_appreciation_rate / 100.0;
    let rent_growth = 1.0 + inputs.rent_increase_rate / 100.0;
    let investment_growth = 1.0 + inputs.investment_return_rate / 100.0;

    let mut years = Vec::with_capacity(inputs.time_horizon as usize + 1);
    let mut current_rent = inputs.initial_rent;
    let mut cumulative_reinvested_savings = 0.0;
    let mut cumulative_extra_costs = 0.0;

    for year in 0..=inputs.time_horizon {
        let home_value = inputs.home_price * appreciation_growth.powi(year as i32);
        let loan_balance = if year == 0 {
            loan_amount
        } else {
            remaining_balance(loan_amount, monthly_rate, num_payments, year * 12)
        };
        // Selling costs are realized only in the terminal year.
        let selling_cost = if year == inputs.time_horizon {
            home_value * inputs.selling_costs_percent / 100.0
        } else {
            0.0
        };

        if year > 0 {
            cumulative_extra_costs += annual_extra_cost;
            let yearly_savings = total_monthly_cost * 12.0 - current_rent * 12.0;
            cumulative_reinvested_savings =
                (cumulative_reinvested_savings + yearly_savings) * investment_growth;
        }

        let buy_net_worth =
            (home_value - loan_balance - selling_cost - closing_cost - cumulative_extra_costs)
                .max(0.0);
        // The renter invests the cash a buyer would have committed up front.
        let invested_initial =
            (inputs.down_payment + closing_cost) * investment_growth.powi(year as i32);
        let rent_net_worth = (invested_initial + cumulative_reinvested_savings).max(0.0);

        years.push(YearPoint {
            year,
            buy_net_worth: buy_net_worth.round(),
            rent_net_worth: rent_net_worth.round(),
        });

        current_rent *= rent_growth;
    }

    let final_point = years[years.len() - 1];
    let final_buy_net_worth = final_point.buy_net_worth;
    let final_rent_net_worth = final_point.rent_net_worth;
    let difference = final_rent_net_worth - final_buy_net_worth;
    let winner = if difference > 0.0 {
        Winner::Rent
    } else {
        Winner::Buy
    };
    let breakeven_year = years
        .iter()
        .find(|point| point.buy_net_worth >= point.rent_net_worth)
        .map(|point| point.year);

    Ok(ProjectionResult {
        years,
        final_buy_net_worth,
        final_rent_net_worth,
        difference,
        winner,
        breakeven_year,
        monthly_payment: payment,
        monthly_ownership_cost: total_monthly_cost,
    })
}
