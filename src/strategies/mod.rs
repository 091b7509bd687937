mod avalanche;
mod snowball;

use crate::models::StrategyConfig;
use crate::state::DebtState;

pub use avalanche::AvalancheStrategy;
pub use snowball::SnowballStrategy;

/// Decides which debt receives the budget surplus. The order is fixed
/// once from the initial balances and rates; the engine never re-sorts.
pub trait PayoffStrategy {
    fn name(&self) -> &'static str;
    fn prioritize(&self, debts: &mut [DebtState]);
}

pub fn build_strategy(strategy: StrategyConfig) -> Box<dyn PayoffStrategy> {
    match strategy {
        StrategyConfig::Snowball => Box::new(SnowballStrategy),
        StrategyConfig::Avalanche => Box::new(AvalancheStrategy),
    }
}

#[cfg(test)]
pub(crate) fn debt_state(
    name: &str,
    balance: f64,
    monthly_rate: f64,
    min_payment: f64,
) -> DebtState {
    DebtState {
        id: name.to_string(),
        name: name.to_string(),
        balance,
        monthly_rate,
        min_payment,
    }
}
