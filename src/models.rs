use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Debt {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub balance: f64,
    /// Percent of the remaining balance charged each month.
    pub monthly_rate: f64,
    pub min_payment: f64,
}

impl Debt {
    pub fn new(name: &str, balance: f64, monthly_rate: f64, min_payment: f64) -> Self {
        Self {
            id: String::new(),
            name: name.to_string(),
            balance,
            monthly_rate,
            min_payment,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PayoffConfig {
    pub debts: Vec<Debt>,
    pub monthly_budget: f64,
    #[serde(default)]
    pub strategy: Option<StrategyConfig>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyConfig {
    Snowball,
    Avalanche,
}

impl StrategyConfig {
    pub const ALL: [StrategyConfig; 2] = [StrategyConfig::Avalanche, StrategyConfig::Snowball];

    pub fn label(&self) -> &'static str {
        match self {
            StrategyConfig::Snowball => "snowball",
            StrategyConfig::Avalanche => "avalanche",
        }
    }
}

impl fmt::Display for StrategyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AmortizationSystem {
    /// Fixed installment (French amortization).
    Price,
    /// Fixed principal portion, declining installment.
    Sac,
}

impl fmt::Display for AmortizationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmortizationSystem::Price => f.write_str("price"),
            AmortizationSystem::Sac => f.write_str("sac"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MortgageConfig {
    pub principal: f64,
    /// Annual rate as a fraction, e.g. `0.10` for 10% a year.
    pub annual_rate: f64,
    pub term_years: u32,
    #[serde(default = "default_system")]
    pub system: AmortizationSystem,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CompoundConfig {
    #[serde(default)]
    pub initial: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    pub annual_rate: f64,
    pub years: u32,
}

fn default_system() -> AmortizationSystem {
    AmortizationSystem::Price
}
