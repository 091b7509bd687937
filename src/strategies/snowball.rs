use crate::state::DebtState;
use crate::strategies::PayoffStrategy;

/// Smallest balance first.
pub struct SnowballStrategy;

impl PayoffStrategy for SnowballStrategy {
    fn name(&self) -> &'static str {
        "snowball"
    }

    fn prioritize(&self, debts: &mut [DebtState]) {
        debts.sort_by(|a, b| a.balance.total_cmp(&b.balance));
    }
}
