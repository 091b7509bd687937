use tracing::{debug, warn};

use crate::models::{Debt, PayoffConfig, StrategyConfig};
use crate::state::{DebtState, PayoffReport, PayoffStatus, ScheduleRow, SimulationResult};
use crate::strategies::{build_strategy, AvalancheStrategy, PayoffStrategy, SnowballStrategy};

/// Hard iteration cap: 50 years of monthly payments.
pub const MAX_MONTHS: u32 = 600;
/// A balance at or below this is treated as paid off.
pub const PAID_OFF_EPSILON: f64 = 0.01;

const MINIMUM_ONLY: &str = "minimum-only";

pub struct PayoffEngine<'a> {
    pub debts: Vec<DebtState>,
    pub monthly_budget: f64,
    pub strategy: &'a dyn PayoffStrategy,
}

impl<'a> PayoffEngine<'a> {
    pub fn new(debts: &[Debt], monthly_budget: f64, strategy: &'a dyn PayoffStrategy) -> Self {
        Self {
            debts: eligible_debts(debts),
            monthly_budget,
            strategy,
        }
    }

    pub fn run(self) -> SimulationResult {
        let baseline = run_minimum_only(self.debts.clone());
        self.run_against(&baseline)
    }

    /// Runs the strategy and reports savings relative to an already
    /// computed minimum-only baseline for the same debts.
    pub fn run_against(mut self, baseline: &SimulationResult) -> SimulationResult {
        let name = self.strategy.name();
        let total_minimums = total_minimums(&self.debts);
        if self.monthly_budget.is_nan() || self.monthly_budget < total_minimums {
            debug!(
                strategy = name,
                budget = self.monthly_budget,
                total_minimums,
                "budget does not cover minimum payments"
            );
            return SimulationResult::insufficient_budget(name);
        }

        let non_amortizing = non_amortizing(&self.debts);
        self.strategy.prioritize(&mut self.debts);
        let payoff_order = self.debts.iter().map(|debt| debt.name.clone()).collect();

        let mut schedule = Vec::new();
        let mut total_interest = 0.0;
        let mut total_paid = 0.0;
        let mut month = 0u32;

        while !self.debts.is_empty() && month < MAX_MONTHS {
            month += 1;

            let mut interest_this_month = 0.0;
            for debt in &mut self.debts {
                let interest = debt.monthly_interest();
                debt.balance += interest;
                interest_this_month += interest;
            }

            let mut remaining_budget = self.monthly_budget;
            let mut paid_this_month = 0.0;
            for debt in self.debts.iter_mut().rev() {
                let payment = debt.min_payment.min(debt.balance).min(remaining_budget);
                debt.balance -= payment;
                remaining_budget -= payment;
                paid_this_month += payment;
            }
            self.debts.retain(|debt| debt.balance > PAID_OFF_EPSILON);

            // Surplus goes to the highest-priority debt still open.
            if remaining_budget > 0.0 {
                if let Some(target) = self.debts.first_mut() {
                    let payment = remaining_budget.min(target.balance);
                    target.balance -= payment;
                    paid_this_month += payment;
                }
            }
            self.debts.retain(|debt| debt.balance > PAID_OFF_EPSILON);

            total_interest += interest_this_month;
            total_paid += paid_this_month;
            schedule.push(ScheduleRow {
                month,
                remaining_balance: self.debts.iter().map(|debt| debt.balance).sum(),
                interest_this_month,
                paid_this_month,
            });
        }

        let status = if self.debts.is_empty() {
            PayoffStatus::PaidOff
        } else {
            warn!(
                strategy = name,
                open_debts = self.debts.len(),
                "payoff did not converge within {} months",
                MAX_MONTHS
            );
            PayoffStatus::NotConverging
        };

        SimulationResult {
            strategy: name.to_string(),
            status,
            months_to_payoff: month,
            total_interest,
            total_paid,
            savings_vs_minimum_only: savings(baseline.total_interest, total_interest),
            payoff_order,
            non_amortizing,
            schedule,
        }
    }
}

/// Interest saved against the baseline. `inf - inf` counts as no savings
/// and an infinite difference saturates at the `f64` range.
fn savings(baseline_interest: f64, strategy_interest: f64) -> f64 {
    let savings = baseline_interest - strategy_interest;
    if savings.is_nan() {
        0.0
    } else {
        savings.clamp(f64::MIN, f64::MAX)
    }
}

pub fn simulate_minimum_only(debts: &[Debt]) -> SimulationResult {
    run_minimum_only(eligible_debts(debts))
}

pub fn simulate_snowball(debts: &[Debt], monthly_budget: f64) -> SimulationResult {
    simulate_strategy(debts, monthly_budget, &SnowballStrategy)
}

pub fn simulate_avalanche(debts: &[Debt], monthly_budget: f64) -> SimulationResult {
    simulate_strategy(debts, monthly_budget, &AvalancheStrategy)
}

pub fn simulate_strategy(
    debts: &[Debt],
    monthly_budget: f64,
    strategy: &dyn PayoffStrategy,
) -> SimulationResult {
    PayoffEngine::new(debts, monthly_budget, strategy).run()
}

/// Runs the baseline once and every requested strategy against it.
pub fn compare_strategies(config: &PayoffConfig) -> PayoffReport {
    let eligible = eligible_debts(&config.debts);
    let total_minimums = total_minimums(&eligible);
    let baseline = run_minimum_only(eligible.clone());

    let selected: Vec<StrategyConfig> = match config.strategy {
        Some(strategy) => vec![strategy],
        None => StrategyConfig::ALL.to_vec(),
    };
    let strategies: Vec<SimulationResult> = selected
        .into_iter()
        .map(|selection| {
            let strategy = build_strategy(selection);
            let engine = PayoffEngine {
                debts: eligible.clone(),
                monthly_budget: config.monthly_budget,
                strategy: strategy.as_ref(),
            };
            engine.run_against(&baseline)
        })
        .collect();
    let recommended = recommend(&strategies);

    PayoffReport {
        monthly_budget: config.monthly_budget,
        total_minimums,
        eligible_debts: eligible.len(),
        baseline,
        strategies,
        recommended,
    }
}

pub fn eligible_debts(debts: &[Debt]) -> Vec<DebtState> {
    let eligible: Vec<DebtState> = debts
        .iter()
        .filter(|debt| is_eligible(debt))
        .map(|debt| DebtState {
            id: debt.id.clone(),
            name: debt.name.clone(),
            balance: debt.balance,
            monthly_rate: debt.monthly_rate,
            min_payment: debt.min_payment,
        })
        .collect();
    if eligible.len() != debts.len() {
        debug!(
            eligible = eligible.len(),
            excluded = debts.len() - eligible.len(),
            "excluded incomplete debt entries"
        );
    }
    eligible
}

fn is_eligible(debt: &Debt) -> bool {
    !debt.name.trim().is_empty()
        && debt.balance.is_finite()
        && debt.balance > 0.0
        && debt.monthly_rate.is_finite()
        && debt.monthly_rate >= 0.0
        && debt.min_payment.is_finite()
        && debt.min_payment > 0.0
}

fn run_minimum_only(mut debts: Vec<DebtState>) -> SimulationResult {
    let non_amortizing = non_amortizing(&debts);
    let mut schedule = Vec::new();
    let mut total_interest = 0.0;
    let mut total_paid = 0.0;
    let mut month = 0u32;

    while has_open_balance(&debts) && month < MAX_MONTHS {
        month += 1;

        let mut interest_this_month = 0.0;
        let mut paid_this_month = 0.0;
        for debt in debts
            .iter_mut()
            .filter(|debt| debt.balance > PAID_OFF_EPSILON)
        {
            let interest = debt.monthly_interest();
            debt.balance += interest;
            interest_this_month += interest;

            let payment = debt.min_payment.min(debt.balance);
            debt.balance -= payment;
            paid_this_month += payment;
        }

        total_interest += interest_this_month;
        total_paid += paid_this_month;
        schedule.push(ScheduleRow {
            month,
            remaining_balance: open_balance(&debts),
            interest_this_month,
            paid_this_month,
        });
    }

    let status = if has_open_balance(&debts) {
        warn!(
            strategy = MINIMUM_ONLY,
            "payoff did not converge within {} months", MAX_MONTHS
        );
        PayoffStatus::NotConverging
    } else {
        PayoffStatus::PaidOff
    };

    SimulationResult {
        strategy: MINIMUM_ONLY.to_string(),
        status,
        months_to_payoff: month,
        total_interest,
        total_paid,
        savings_vs_minimum_only: 0.0,
        payoff_order: Vec::new(),
        non_amortizing,
        schedule,
    }
}

fn total_minimums(debts: &[DebtState]) -> f64 {
    debts.iter().map(|debt| debt.min_payment).sum()
}

fn has_open_balance(debts: &[DebtState]) -> bool {
    debts.iter().any(|debt| debt.balance > PAID_OFF_EPSILON)
}

fn open_balance(debts: &[DebtState]) -> f64 {
    debts
        .iter()
        .filter(|debt| debt.balance > PAID_OFF_EPSILON)
        .map(|debt| debt.balance)
        .sum()
}

fn non_amortizing(debts: &[DebtState]) -> Vec<String> {
    debts
        .iter()
        .filter(|debt| debt.min_payment <= debt.monthly_interest())
        .map(|debt| debt.name.clone())
        .collect()
}

fn recommend(strategies: &[SimulationResult]) -> Option<String> {
    strategies
        .iter()
        .filter(|result| result.status == PayoffStatus::PaidOff)
        .min_by(|a, b| {
            a.total_interest
                .total_cmp(&b.total_interest)
                .then_with(|| a.months_to_payoff.cmp(&b.months_to_payoff))
        })
        .map(|result| result.strategy.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn distinct_debts() -> Vec<Debt> {
        vec![
            Debt::new("A", 500.0, 2.0, 50.0),
            Debt::new("B", 2_000.0, 3.0, 80.0),
        ]
    }

    #[test]
    fn zero_rate_single_debt_pays_off_in_twelve_months() {
        let debts = vec![Debt::new("card", 1_200.0, 0.0, 100.0)];
        let results = [
            simulate_minimum_only(&debts),
            simulate_snowball(&debts, 100.0),
            simulate_avalanche(&debts, 100.0),
        ];

        for result in &results {
            assert_eq!(result.status, PayoffStatus::PaidOff);
            assert_eq!(result.months_to_payoff, 12);
            assert_eq!(result.schedule.len(), 12);
            assert_eq!(result.total_interest, 0.0);
            assert_eq!(result.total_paid, 1_200.0);
            assert_eq!(result.final_balance(), 0.0);
        }
    }

    #[test]
    fn orders_match_when_one_debt_dominates() {
        let debts = vec![
            Debt::new("A", 500.0, 5.0, 50.0),
            Debt::new("B", 2_000.0, 2.0, 80.0),
        ];
        assert_eq!(simulate_snowball(&debts, 200.0).payoff_order, vec!["A", "B"]);
        assert_eq!(simulate_avalanche(&debts, 200.0).payoff_order, vec!["A", "B"]);
    }

    #[test]
    fn strategies_order_debts_differently() {
        let debts = distinct_debts();
        assert_eq!(simulate_snowball(&debts, 200.0).payoff_order, vec!["A", "B"]);
        assert_eq!(simulate_avalanche(&debts, 200.0).payoff_order, vec!["B", "A"]);
    }

    #[test]
    fn surplus_rolls_to_priority_debt() {
        let debts = vec![
            Debt::new("A", 300.0, 0.0, 50.0),
            Debt::new("B", 600.0, 0.0, 50.0),
        ];
        let result = simulate_snowball(&debts, 200.0);
        let remaining: Vec<f64> = result
            .schedule
            .iter()
            .map(|row| row.remaining_balance)
            .collect();

        assert_eq!(remaining, vec![700.0, 500.0, 300.0, 100.0, 0.0]);
        assert_eq!(result.months_to_payoff, 5);
        assert_eq!(result.total_paid, 900.0);
        assert_eq!(result.schedule[4].paid_this_month, 100.0);
    }

    #[test]
    fn insufficient_budget_returns_zero_sentinel() {
        let debts = distinct_debts();
        for result in [simulate_snowball(&debts, 129.99), simulate_avalanche(&debts, 0.0)] {
            assert_eq!(result.status, PayoffStatus::InsufficientBudget);
            assert_eq!(result.months_to_payoff, 0);
            assert!(result.schedule.is_empty());
            assert!(result.payoff_order.is_empty());
            assert_eq!(result.total_paid, 0.0);
            assert_eq!(result.savings_vs_minimum_only, 0.0);
        }
    }

    #[test]
    fn budget_equal_to_minimums_is_accepted() {
        let debts = distinct_debts();
        let result = simulate_avalanche(&debts, 130.0);
        assert_eq!(result.status, PayoffStatus::PaidOff);
        assert!(result.savings_vs_minimum_only >= -TOLERANCE);
    }

    #[test]
    fn extra_budget_saves_interest_against_baseline() {
        let debts = distinct_debts();
        let baseline = simulate_minimum_only(&debts);
        let snowball = simulate_snowball(&debts, 300.0);
        let avalanche = simulate_avalanche(&debts, 300.0);

        assert!(snowball.savings_vs_minimum_only > 0.0);
        assert!(avalanche.savings_vs_minimum_only > 0.0);
        assert!(snowball.months_to_payoff < baseline.months_to_payoff);
        assert!(
            (baseline.total_interest - avalanche.total_interest - avalanche.savings_vs_minimum_only)
                .abs()
                < TOLERANCE
        );
        assert!(avalanche.total_interest < snowball.total_interest);
    }

    #[test]
    fn schedules_never_increase_for_amortizing_debts() {
        let debts = distinct_debts();
        for result in [
            simulate_minimum_only(&debts),
            simulate_snowball(&debts, 250.0),
            simulate_avalanche(&debts, 250.0),
        ] {
            for pair in result.schedule.windows(2) {
                assert!(pair[1].remaining_balance <= pair[0].remaining_balance + TOLERANCE);
            }
        }
    }

    #[test]
    fn interest_and_payments_reconcile_with_schedule() {
        let debts = distinct_debts();
        let result = simulate_snowball(&debts, 250.0);
        let interest: f64 = result.schedule.iter().map(|row| row.interest_this_month).sum();
        let paid: f64 = result.schedule.iter().map(|row| row.paid_this_month).sum();

        assert!((interest - result.total_interest).abs() < TOLERANCE);
        assert!((paid - result.total_paid).abs() < TOLERANCE);
        // Principal plus interest, less any sub-cent residue written off.
        assert!((result.total_paid - (2_500.0 + result.total_interest)).abs() < 0.05);
    }

    #[test]
    fn underfunded_minimum_hits_the_cap() {
        let debts = vec![Debt::new("loan", 1_000.0, 10.0, 50.0)];
        let result = simulate_minimum_only(&debts);

        assert_eq!(result.status, PayoffStatus::NotConverging);
        assert_eq!(result.months_to_payoff, MAX_MONTHS);
        assert_eq!(result.non_amortizing, vec!["loan"]);
        assert!(result.final_balance() > 1_000.0);
    }

    #[test]
    fn overflowing_interest_reports_finite_savings() {
        let debts = vec![Debt::new("x", 1_000.0, 500.0, 10.0)];
        let baseline = simulate_minimum_only(&debts);
        let result = simulate_avalanche(&debts, 50.0);

        assert!(baseline.total_interest.is_infinite());
        assert!(result.total_interest.is_infinite());
        assert_eq!(result.status, PayoffStatus::NotConverging);
        assert_eq!(result.savings_vs_minimum_only, 0.0);
    }

    #[test]
    fn savings_saturates_instead_of_overflowing() {
        assert_eq!(savings(120.0, 20.0), 100.0);
        assert_eq!(savings(f64::INFINITY, f64::INFINITY), 0.0);
        assert_eq!(savings(f64::INFINITY, 1_000.0), f64::MAX);
    }

    #[test]
    fn exact_fifty_year_payoff_is_not_flagged() {
        let paid = simulate_minimum_only(&[Debt::new("slow", 600.0, 0.0, 1.0)]);
        assert_eq!(paid.months_to_payoff, MAX_MONTHS);
        assert_eq!(paid.status, PayoffStatus::PaidOff);

        let unpaid = simulate_minimum_only(&[Debt::new("slower", 601.0, 0.0, 1.0)]);
        assert_eq!(unpaid.months_to_payoff, MAX_MONTHS);
        assert_eq!(unpaid.status, PayoffStatus::NotConverging);
        assert_eq!(unpaid.final_balance(), 1.0);
    }

    #[test]
    fn ineligible_entries_are_skipped() {
        let debts = vec![
            Debt::new("", 100.0, 1.0, 10.0),
            Debt::new("   ", 100.0, 1.0, 10.0),
            Debt::new("zero", 0.0, 1.0, 10.0),
            Debt::new("negative-rate", 100.0, -1.0, 10.0),
            Debt::new("no-minimum", 100.0, 1.0, 0.0),
            Debt::new("nan", f64::NAN, 1.0, 10.0),
            Debt::new("kept", 100.0, 0.0, 25.0),
        ];
        assert_eq!(eligible_debts(&debts).len(), 1);

        let result = simulate_snowball(&debts, 25.0);
        assert_eq!(result.payoff_order, vec!["kept"]);
        assert_eq!(result.months_to_payoff, 4);
    }

    #[test]
    fn caller_debts_are_not_mutated() {
        let debts = distinct_debts();
        let before = debts.clone();
        let first = simulate_avalanche(&debts, 250.0);
        let second = simulate_avalanche(&debts, 250.0);

        assert_eq!(debts, before);
        assert_eq!(first, second);
    }

    #[test]
    fn no_eligible_debts_yields_empty_paid_off_result() {
        let result = simulate_snowball(&[], 100.0);
        assert_eq!(result.status, PayoffStatus::PaidOff);
        assert_eq!(result.months_to_payoff, 0);
        assert!(result.schedule.is_empty());
    }

    #[test]
    fn compare_recommends_lowest_interest_strategy() {
        let config = PayoffConfig {
            debts: distinct_debts(),
            monthly_budget: 300.0,
            strategy: None,
        };
        let report = compare_strategies(&config);

        assert_eq!(report.eligible_debts, 2);
        assert_eq!(report.total_minimums, 130.0);
        let labels: Vec<&str> = report
            .strategies
            .iter()
            .map(|result| result.strategy.as_str())
            .collect();
        assert_eq!(labels, vec!["avalanche", "snowball"]);
        assert_eq!(report.recommended.as_deref(), Some("avalanche"));
        assert_eq!(report.strategies[1], simulate_snowball(&config.debts, 300.0));
    }

    #[test]
    fn compare_honours_single_strategy_and_empty_recommendation() {
        let config = PayoffConfig {
            debts: distinct_debts(),
            monthly_budget: 100.0,
            strategy: Some(StrategyConfig::Snowball),
        };
        let report = compare_strategies(&config);

        assert_eq!(report.strategies.len(), 1);
        assert_eq!(report.strategies[0].status, PayoffStatus::InsufficientBudget);
        assert_eq!(report.recommended, None);
    }
}
