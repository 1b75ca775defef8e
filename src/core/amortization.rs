/// Fixed monthly payment on `loan_amount` at `monthly_rate` over `num_payments`
/// months. Degenerate cases: zero rate divides principal evenly, a zero-length
/// schedule owes nothing (callers reject that configuration before projecting).
pub fn monthly_payment(loan_amount: f64, monthly_rate: f64, num_payments: u32) -> f64 {
    if num_payments == 0 {
        return 0.0;
    }
    if monthly_rate <= 0.0 {
        return loan_amount / num_payments as f64;
    }
    let growth = (1.0 + monthly_rate).powi(num_payments as i32);
    loan_amount * monthly_rate * growth / (growth - 1.0)
}

/// Outstanding principal after `payments_made` of `num_payments` monthly
/// payments. Exactly zero once the schedule is complete; linear decline when
/// the rate is zero.
pub fn remaining_balance(
    loan_amount: f64,
    monthly_rate: f64,
    num_payments: u32,
    payments_made: u32,
) -> f64 {
    if num_payments == 0 || payments_made >= num_payments {
        return 0.0;
    }
    if monthly_rate <= 0.0 {
        return loan_amount * (1.0 - payments_made as f64 / num_payments as f64);
    }
    let growth_full = (1.0 + monthly_rate).powi(num_payments as i32);
    let growth_paid = (1.0 + monthly_rate).powi(payments_made as i32);
    loan_amount * (growth_full - growth_paid) / (growth_full - 1.0)
}
