use debt_sim::compound::simulate_compound_interest;
use debt_sim::config::{self, Command, FormatArg};
use debt_sim::engine;
use debt_sim::error::Result;
use debt_sim::logging;
use debt_sim::models::{PayoffConfig, StrategyConfig};
use debt_sim::mortgage::simulate_mortgage_config;
use debt_sim::output::{Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = config::parse_args()?;
    logging::init_logging(&args.log_level)?;

    let output = match args.command {
        Command::Payoff(payoff) => {
            let config = config::build_payoff_config(payoff.input)?;
            let report = engine::compare_strategies(&config);
            formatter_for(payoff.format).payoff(&report)?
        }
        Command::Mortgage(mortgage) => {
            let config = config::build_mortgage_config(&mortgage)?;
            let result = simulate_mortgage_config(&config);
            formatter_for(mortgage.format).mortgage(&result)?
        }
        Command::Compound(compound) => {
            let config = config::build_compound_config(&compound)?;
            let result = simulate_compound_interest(&config);
            formatter_for(compound.format).compound(&result)?
        }
        Command::ListStrategies => StrategyConfig::ALL
            .iter()
            .map(|strategy| format!("{}\n", strategy))
            .collect(),
        Command::ShowConfig(input) => describe_config(&config::build_payoff_config(input)?),
    };
    print!("{}", output);

    Ok(())
}

fn formatter_for(format: FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}

fn describe_config(config: &PayoffConfig) -> String {
    let strategy = config
        .strategy
        .map(|strategy| strategy.to_string())
        .unwrap_or_else(|| "all".to_string());
    let mut out = format!(
        "Budget: {:.2}\nStrategy: {}\nDebts:\n",
        config.monthly_budget, strategy
    );
    for debt in &config.debts {
        out.push_str(&format!(
            "- {} [{}] (balance: {:.2}, monthly rate: {:.2}%, minimum: {:.2})\n",
            debt.name, debt.id, debt.balance, debt.monthly_rate, debt.min_payment
        ));
    }
    out
}
