use crate::state::DebtState;
use crate::strategies::PayoffStrategy;

/// Highest monthly rate first.
pub struct AvalancheStrategy;

impl PayoffStrategy for AvalancheStrategy {
    fn name(&self) -> &'static str {
        "avalanche"
    }

    fn prioritize(&self, debts: &mut [DebtState]) {
        debts.sort_by(|a, b| b.monthly_rate.total_cmp(&a.monthly_rate));
    }
}
