use tracing::debug;

use crate::models::{AmortizationSystem, MortgageConfig};
use crate::state::{MortgageResult, MortgageRow};

/// Longest term accepted by the mortgage and compound calculators.
pub const MAX_TERM_YEARS: u32 = 100;

/// Months in a term of `years`, or `None` when the term is out of range.
pub fn term_months(years: u32) -> Option<u32> {
    if (1..=MAX_TERM_YEARS).contains(&years) {
        years.checked_mul(12)
    } else {
        None
    }
}

/// Converts an annual rate to its compound-equivalent monthly rate.
pub fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

pub fn simulate_mortgage_config(config: &MortgageConfig) -> MortgageResult {
    simulate_mortgage(
        config.principal,
        config.annual_rate,
        config.term_years,
        config.system,
    )
}

pub fn simulate_mortgage(
    principal: f64,
    annual_rate: f64,
    term_years: u32,
    system: AmortizationSystem,
) -> MortgageResult {
    if !principal.is_finite() || principal <= 0.0 || !annual_rate.is_finite() || annual_rate < 0.0
    {
        debug!(principal, annual_rate, "mortgage input out of range");
        return MortgageResult::empty(system);
    }
    let Some(months) = term_months(term_years) else {
        debug!(term_years, "mortgage term out of range");
        return MortgageResult::empty(system);
    };

    let rate = monthly_rate(annual_rate);
    let schedule = match system {
        AmortizationSystem::Price => price_schedule(principal, rate, months),
        AmortizationSystem::Sac => sac_schedule(principal, rate, months),
    };

    let first_installment = schedule.first().map(|row| row.installment).unwrap_or(0.0);
    let last_installment = schedule.last().map(|row| row.installment).unwrap_or(0.0);
    let total_paid = schedule.iter().map(|row| row.installment).sum();
    let total_interest = schedule.iter().map(|row| row.interest).sum();

    MortgageResult {
        system,
        monthly_rate: rate,
        schedule,
        first_installment,
        last_installment,
        total_paid,
        total_interest,
    }
}

/// Fixed installment `P * i(1+i)^n / ((1+i)^n - 1)`, or `P / n` at zero rate.
pub fn price_installment(principal: f64, rate: f64, months: u32) -> f64 {
    if rate == 0.0 {
        return principal / f64::from(months);
    }
    let growth = (1.0 + rate).powf(f64::from(months));
    principal * (rate * growth) / (growth - 1.0)
}

fn price_schedule(principal: f64, rate: f64, months: u32) -> Vec<MortgageRow> {
    let installment = price_installment(principal, rate, months);
    let mut balance = principal;
    (1..=months)
        .map(|month| {
            let interest = balance * rate;
            let amortization = installment - interest;
            balance = (balance - amortization).max(0.0);
            MortgageRow {
                month,
                installment,
                interest,
                amortization,
                balance,
            }
        })
        .collect()
}

fn sac_schedule(principal: f64, rate: f64, months: u32) -> Vec<MortgageRow> {
    let amortization = principal / f64::from(months);
    let mut balance = principal;
    (1..=months)
        .map(|month| {
            let interest = balance * rate;
            balance = (balance - amortization).max(0.0);
            MortgageRow {
                month,
                installment: amortization + interest,
                interest,
                amortization,
                balance,
            }
        })
        .collect()
}
