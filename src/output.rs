use std::fmt::{self, Write};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::state::{CompoundResult, MortgageResult, PayoffReport, SimulationResult};

pub trait Formatter {
    fn payoff(&self, report: &PayoffReport) -> Result<String>;
    fn mortgage(&self, result: &MortgageResult) -> Result<String>;
    fn compound(&self, result: &CompoundResult) -> Result<String>;
}

/// Metrics plus full schedules (mortgage schedules sampled yearly).
pub struct HumanFormatter;

/// Metrics only.
pub struct SummaryFormatter;

pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn payoff(&self, report: &PayoffReport) -> Result<String> {
        render(|out| write_payoff(out, report, true))
    }

    fn mortgage(&self, result: &MortgageResult) -> Result<String> {
        render(|out| write_mortgage(out, result, true))
    }

    fn compound(&self, result: &CompoundResult) -> Result<String> {
        render(|out| write_compound(out, result, true))
    }
}

impl Formatter for SummaryFormatter {
    fn payoff(&self, report: &PayoffReport) -> Result<String> {
        render(|out| write_payoff(out, report, false))
    }

    fn mortgage(&self, result: &MortgageResult) -> Result<String> {
        render(|out| write_mortgage(out, result, false))
    }

    fn compound(&self, result: &CompoundResult) -> Result<String> {
        render(|out| write_compound(out, result, false))
    }
}

impl Formatter for JsonFormatter {
    fn payoff(&self, report: &PayoffReport) -> Result<String> {
        to_json(report)
    }

    fn mortgage(&self, result: &MortgageResult) -> Result<String> {
        to_json(result)
    }

    fn compound(&self, result: &CompoundResult) -> Result<String> {
        to_json(result)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(value).map_err(|err| Error::Output(err.to_string()))?;
    json.push('\n');
    Ok(json)
}

fn render<F>(write: F) -> Result<String>
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut out = String::new();
    write(&mut out).map_err(|err| Error::Output(err.to_string()))?;
    Ok(out)
}

fn write_payoff(out: &mut String, report: &PayoffReport, with_schedule: bool) -> fmt::Result {
    writeln!(out, "Metadata:")?;
    writeln!(out, "budget: {:.2}", report.monthly_budget)?;
    writeln!(out, "total_minimums: {:.2}", report.total_minimums)?;
    writeln!(out, "eligible_debts: {}", report.eligible_debts)?;
    writeln!(
        out,
        "recommended: {}",
        report.recommended.as_deref().unwrap_or("none")
    )?;

    writeln!(out, "Baseline:")?;
    write_result_line(out, &report.baseline, false)?;

    writeln!(out, "Strategies:")?;
    for result in &report.strategies {
        write_result_line(out, result, true)?;
    }

    if with_schedule {
        for result in &report.strategies {
            if result.schedule.is_empty() {
                continue;
            }
            writeln!(out, "Schedule ({}):", result.strategy)?;
            for row in &result.schedule {
                writeln!(
                    out,
                    "Month {}: balance {:.2} (interest {:.2}, paid {:.2})",
                    row.month, row.remaining_balance, row.interest_this_month, row.paid_this_month
                )?;
            }
        }
    }
    Ok(())
}

fn write_result_line(
    out: &mut String,
    result: &SimulationResult,
    with_savings: bool,
) -> fmt::Result {
    write!(
        out,
        "{}: {} in {} months (interest: {:.2}, paid: {:.2}",
        result.strategy,
        result.status.label(),
        result.months_to_payoff,
        result.total_interest,
        result.total_paid
    )?;
    if with_savings {
        write!(out, ", savings: {:.2}", result.savings_vs_minimum_only)?;
    }
    writeln!(out, ")")?;
    if !result.payoff_order.is_empty() {
        writeln!(out, "  order: {}", result.payoff_order.join(", "))?;
    }
    if !result.non_amortizing.is_empty() {
        writeln!(out, "  non-amortizing: {}", result.non_amortizing.join(", "))?;
    }
    Ok(())
}

fn write_mortgage(out: &mut String, result: &MortgageResult, with_schedule: bool) -> fmt::Result {
    writeln!(out, "Metadata:")?;
    writeln!(out, "system: {}", result.system)?;
    writeln!(out, "monthly_rate: {:.6}%", result.monthly_rate * 100.0)?;
    writeln!(out, "months: {}", result.schedule.len())?;
    writeln!(out, "Summary:")?;
    writeln!(out, "first_installment: {:.2}", result.first_installment)?;
    writeln!(out, "last_installment: {:.2}", result.last_installment)?;
    writeln!(out, "total_paid: {:.2}", result.total_paid)?;
    writeln!(out, "total_interest: {:.2}", result.total_interest)?;

    if with_schedule {
        writeln!(out, "Schedule (yearly):")?;
        for row in result.yearly_sample() {
            writeln!(
                out,
                "Month {}: installment {:.2} (interest {:.2}, amortization {:.2}, balance {:.2})",
                row.month, row.installment, row.interest, row.amortization, row.balance
            )?;
        }
    }
    Ok(())
}

fn write_compound(out: &mut String, result: &CompoundResult, with_schedule: bool) -> fmt::Result {
    writeln!(out, "Metadata:")?;
    writeln!(out, "monthly_rate: {:.6}%", result.monthly_rate * 100.0)?;
    writeln!(out, "years: {}", result.schedule.len())?;
    writeln!(out, "Summary:")?;
    writeln!(out, "final_balance: {:.2}", result.final_balance)?;
    writeln!(out, "total_contributed: {:.2}", result.total_contributed)?;
    writeln!(out, "total_interest: {:.2}", result.total_interest)?;

    if with_schedule {
        writeln!(out, "Schedule:")?;
        for row in &result.schedule {
            writeln!(
                out,
                "Year {}: balance {:.2} (contributed {:.2}, interest {:.2})",
                row.year, row.balance, row.total_contributed, row.interest_earned
            )?;
        }
    }
    Ok(())
}
