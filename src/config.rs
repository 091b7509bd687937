use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::mortgage::{term_months, MAX_TERM_YEARS};
use crate::models::{
    AmortizationSystem, CompoundConfig, Debt, MortgageConfig, PayoffConfig, StrategyConfig,
};

#[derive(Parser, Debug)]
#[command(name = "debt-sim", version, about = "Debt payoff, mortgage and savings calculators")]
pub struct Args {
    /// Default tracing level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare snowball and avalanche payoff against minimum-only payments
    Payoff(PayoffArgs),
    /// Amortize a mortgage under the Price or SAC system
    Mortgage(MortgageArgs),
    /// Project savings growth with monthly contributions
    Compound(CompoundArgs),
    /// Print the supported payoff strategies
    ListStrategies,
    /// Print the parsed payoff configuration without simulating
    ShowConfig(PayoffInput),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct PayoffInput {
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Debt as name:balance:monthly_rate:min_payment, repeatable
    #[arg(long = "debt")]
    pub debt: Vec<String>,
    /// Comma-separated list of name:balance:monthly_rate:min_payment entries
    #[arg(long)]
    pub debts: Option<String>,
    #[arg(long)]
    pub budget: Option<f64>,
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PayoffArgs {
    #[command(flatten)]
    pub input: PayoffInput,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(clap::Args, Debug, Clone)]
pub struct MortgageArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub principal: Option<f64>,
    /// Annual rate as a fraction, e.g. 0.10
    #[arg(long)]
    pub annual_rate: Option<f64>,
    #[arg(long)]
    pub years: Option<u32>,
    #[arg(long, value_enum)]
    pub system: Option<SystemArg>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CompoundArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub initial: Option<f64>,
    #[arg(long)]
    pub monthly_contribution: Option<f64>,
    #[arg(long)]
    pub annual_rate: Option<f64>,
    #[arg(long)]
    pub years: Option<u32>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyArg {
    Snowball,
    Avalanche,
}

impl From<StrategyArg> for StrategyConfig {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Snowball => StrategyConfig::Snowball,
            StrategyArg::Avalanche => StrategyConfig::Avalanche,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemArg {
    Price,
    Sac,
}

impl From<SystemArg> for AmortizationSystem {
    fn from(value: SystemArg) -> Self {
        match value {
            SystemArg::Price => AmortizationSystem::Price,
            SystemArg::Sac => AmortizationSystem::Sac,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Args> {
    match Args::try_parse() {
        Ok(args) => Ok(args),
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            err.exit()
        }
        Err(err) => Err(Error::Cli(err.to_string())),
    }
}

pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

/// Builds a payoff config from an optional file, then layers CLI flags on
/// top: `--budget` and `--strategy` override, debt entries are appended.
pub fn build_payoff_config(input: PayoffInput) -> Result<PayoffConfig> {
    let base: Option<PayoffConfig> = match &input.config {
        Some(path) => Some(load_config(path)?),
        None => None,
    };

    let mut entries = input.debt.clone();
    if let Some(csv) = &input.debts {
        if !csv.trim().is_empty() {
            entries.extend(csv.split(',').map(str::to_string));
        }
    }
    let cli_debts = parse_debts(&entries)?;

    let (mut debts, file_budget, file_strategy) = match base {
        Some(config) => (config.debts, Some(config.monthly_budget), config.strategy),
        None => (Vec::new(), None, None),
    };
    debts.extend(cli_debts);
    check_unique_names(&debts)?;
    assign_ids(&mut debts);

    let monthly_budget = input.budget.or(file_budget).ok_or(Error::MissingArgument("--budget"))?;
    if !monthly_budget.is_finite() || monthly_budget < 0.0 {
        return Err(Error::InvalidBudget(monthly_budget));
    }

    Ok(PayoffConfig {
        debts,
        monthly_budget,
        strategy: input.strategy.map(StrategyConfig::from).or(file_strategy),
    })
}

pub fn build_mortgage_config(args: &MortgageArgs) -> Result<MortgageConfig> {
    let base: Option<MortgageConfig> = match &args.config {
        Some(path) => Some(load_config(path)?),
        None => None,
    };

    let principal = args
        .principal
        .or(base.as_ref().map(|config| config.principal))
        .ok_or(Error::MissingArgument("--principal"))?;
    let annual_rate = args
        .annual_rate
        .or(base.as_ref().map(|config| config.annual_rate))
        .ok_or(Error::MissingArgument("--annual-rate"))?;
    let term_years = args
        .years
        .or(base.as_ref().map(|config| config.term_years))
        .ok_or(Error::MissingArgument("--years"))?;
    let system = args
        .system
        .map(AmortizationSystem::from)
        .or(base.as_ref().map(|config| config.system))
        .unwrap_or(AmortizationSystem::Price);

    if !principal.is_finite() || principal <= 0.0 {
        return Err(Error::InvalidPrincipal(principal));
    }
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(Error::InvalidAnnualRate(annual_rate));
    }
    check_term(term_years)?;

    Ok(MortgageConfig {
        principal,
        annual_rate,
        term_years,
        system,
    })
}

pub fn build_compound_config(args: &CompoundArgs) -> Result<CompoundConfig> {
    let base: Option<CompoundConfig> = match &args.config {
        Some(path) => Some(load_config(path)?),
        None => None,
    };

    let initial = args
        .initial
        .or(base.as_ref().map(|config| config.initial))
        .unwrap_or(0.0);
    let monthly_contribution = args
        .monthly_contribution
        .or(base.as_ref().map(|config| config.monthly_contribution))
        .unwrap_or(0.0);
    let annual_rate = args
        .annual_rate
        .or(base.as_ref().map(|config| config.annual_rate))
        .ok_or(Error::MissingArgument("--annual-rate"))?;
    let years = args
        .years
        .or(base.as_ref().map(|config| config.years))
        .ok_or(Error::MissingArgument("--years"))?;

    for (field, value) in [
        ("initial", initial),
        ("monthly contribution", monthly_contribution),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::NegativeAmount {
                field,
                entry: value.to_string(),
            });
        }
    }
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(Error::InvalidAnnualRate(annual_rate));
    }
    check_term(years)?;

    Ok(CompoundConfig {
        initial,
        monthly_contribution,
        annual_rate,
        years,
    })
}

fn check_term(years: u32) -> Result<()> {
    match term_months(years) {
        Some(_) => Ok(()),
        None => Err(Error::InvalidTerm {
            years,
            max: MAX_TERM_YEARS,
        }),
    }
}

pub fn parse_debts(entries: &[String]) -> Result<Vec<Debt>> {
    entries.iter().map(|entry| parse_debt(entry)).collect()
}

fn parse_debt(entry: &str) -> Result<Debt> {
    let trimmed = entry.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDebtEntry);
    }

    let parts: Vec<&str> = trimmed.split(':').map(str::trim).collect();
    let [name, balance, monthly_rate, min_payment] = parts.as_slice() else {
        return Err(Error::InvalidDebtEntry(trimmed.to_string()));
    };
    if name.is_empty() {
        return Err(Error::InvalidDebtEntry(trimmed.to_string()));
    }

    Ok(Debt::new(
        name,
        parse_amount("balance", balance, trimmed)?,
        parse_amount("monthly rate", monthly_rate, trimmed)?,
        parse_amount("minimum payment", min_payment, trimmed)?,
    ))
}

fn parse_amount(field: &'static str, raw: &str, entry: &str) -> Result<f64> {
    let value: f64 = raw.parse().map_err(|_| Error::InvalidNumber {
        field,
        entry: entry.to_string(),
    })?;
    if !value.is_finite() {
        return Err(Error::InvalidNumber {
            field,
            entry: entry.to_string(),
        });
    }
    if value < 0.0 {
        return Err(Error::NegativeAmount {
            field,
            entry: entry.to_string(),
        });
    }
    Ok(value)
}

fn check_unique_names(debts: &[Debt]) -> Result<()> {
    let mut names = HashSet::new();
    for debt in debts {
        if !debt.name.is_empty() && !names.insert(debt.name.as_str()) {
            return Err(Error::DuplicateDebtName(debt.name.clone()));
        }
    }
    Ok(())
}

fn assign_ids(debts: &mut [Debt]) {
    for (idx, debt) in debts.iter_mut().enumerate() {
        if debt.id.is_empty() {
            debt.id = format!("debt-{}", idx + 1);
        }
    }
}
