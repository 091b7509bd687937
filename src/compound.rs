use tracing::debug;

use crate::models::CompoundConfig;
use crate::mortgage::{monthly_rate, term_months};
use crate::state::{CompoundResult, CompoundRow};

/// Grows `initial` month by month at the compound-equivalent monthly rate,
/// depositing `monthly_contribution` at the end of each month.
pub fn simulate_compound_interest(config: &CompoundConfig) -> CompoundResult {
    let amounts_valid = [config.initial, config.monthly_contribution, config.annual_rate]
        .iter()
        .all(|value| value.is_finite() && *value >= 0.0);
    let months = match term_months(config.years) {
        Some(months) if amounts_valid => months,
        _ => {
            debug!(?config, "compound input out of range");
            return CompoundResult::empty();
        }
    };

    let rate = monthly_rate(config.annual_rate);
    let mut balance = config.initial;
    let mut total_contributed = config.initial;
    let mut interest_earned = 0.0;
    let mut schedule = Vec::with_capacity(config.years as usize);

    for month in 1..=months {
        let interest = balance * rate;
        balance += interest + config.monthly_contribution;
        interest_earned += interest;
        total_contributed += config.monthly_contribution;

        if month % 12 == 0 {
            schedule.push(CompoundRow {
                year: month / 12,
                total_contributed,
                interest_earned,
                balance,
            });
        }
    }

    CompoundResult {
        monthly_rate: rate,
        schedule,
        final_balance: balance,
        total_contributed,
        total_interest: interest_earned,
    }
}
