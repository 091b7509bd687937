use serde::Serialize;

use crate::models::AmortizationSystem;

/// Owned working copy of an eligible debt. The engine mutates `balance`
/// month by month; the caller's `Debt` is never touched.
#[derive(Clone, Debug, PartialEq)]
pub struct DebtState {
    pub id: String,
    pub name: String,
    pub balance: f64,
    pub monthly_rate: f64,
    pub min_payment: f64,
}

impl DebtState {
    pub fn monthly_interest(&self) -> f64 {
        self.balance * (self.monthly_rate / 100.0)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ScheduleRow {
    pub month: u32,
    pub remaining_balance: f64,
    pub interest_this_month: f64,
    pub paid_this_month: f64,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PayoffStatus {
    PaidOff,
    InsufficientBudget,
    NotConverging,
}

impl PayoffStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PayoffStatus::PaidOff => "paid-off",
            PayoffStatus::InsufficientBudget => "insufficient-budget",
            PayoffStatus::NotConverging => "not-converging",
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SimulationResult {
    pub strategy: String,
    pub status: PayoffStatus,
    pub months_to_payoff: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub savings_vs_minimum_only: f64,
    pub payoff_order: Vec<String>,
    /// Debts whose minimum payment does not cover their first month of interest.
    pub non_amortizing: Vec<String>,
    pub schedule: Vec<ScheduleRow>,
}

impl SimulationResult {
    /// Zero sentinel returned when the budget cannot cover the minimums.
    pub fn insufficient_budget(strategy: &str) -> Self {
        Self {
            strategy: strategy.to_string(),
            status: PayoffStatus::InsufficientBudget,
            months_to_payoff: 0,
            total_interest: 0.0,
            total_paid: 0.0,
            savings_vs_minimum_only: 0.0,
            payoff_order: Vec::new(),
            non_amortizing: Vec::new(),
            schedule: Vec::new(),
        }
    }

    pub fn final_balance(&self) -> f64 {
        self.schedule
            .last()
            .map(|row| row.remaining_balance)
            .unwrap_or(0.0)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PayoffReport {
    pub monthly_budget: f64,
    pub total_minimums: f64,
    pub eligible_debts: usize,
    pub baseline: SimulationResult,
    pub strategies: Vec<SimulationResult>,
    pub recommended: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MortgageRow {
    pub month: u32,
    pub installment: f64,
    pub interest: f64,
    pub amortization: f64,
    pub balance: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MortgageResult {
    pub system: AmortizationSystem,
    pub monthly_rate: f64,
    pub schedule: Vec<MortgageRow>,
    pub first_installment: f64,
    pub last_installment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

impl MortgageResult {
    pub fn empty(system: AmortizationSystem) -> Self {
        Self {
            system,
            monthly_rate: 0.0,
            schedule: Vec::new(),
            first_installment: 0.0,
            last_installment: 0.0,
            total_paid: 0.0,
            total_interest: 0.0,
        }
    }

    /// Rows at each 12-month boundary, plus the final row when the term
    /// does not end on one.
    pub fn yearly_sample(&self) -> Vec<&MortgageRow> {
        let mut rows: Vec<&MortgageRow> = self
            .schedule
            .iter()
            .filter(|row| row.month % 12 == 0)
            .collect();
        if let Some(last) = self.schedule.last() {
            if last.month % 12 != 0 {
                rows.push(last);
            }
        }
        rows
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CompoundRow {
    pub year: u32,
    pub total_contributed: f64,
    pub interest_earned: f64,
    pub balance: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CompoundResult {
    pub monthly_rate: f64,
    pub schedule: Vec<CompoundRow>,
    pub final_balance: f64,
    pub total_contributed: f64,
    pub total_interest: f64,
}

impl CompoundResult {
    pub fn empty() -> Self {
        Self {
            monthly_rate: 0.0,
            schedule: Vec::new(),
            final_balance: 0.0,
            total_contributed: 0.0,
            total_interest: 0.0,
        }
    }
}
