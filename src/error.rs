use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("debts must not contain empty entries")]
    EmptyDebtEntry,
    #[error("invalid debt entry '{0}': expected name:balance:monthly_rate:min_payment")]
    InvalidDebtEntry(String),
    #[error("duplicate debt name '{0}'")]
    DuplicateDebtName(String),
    #[error("invalid {field} in '{entry}'")]
    InvalidNumber { field: &'static str, entry: String },
    #[error("{field} must be >= 0 in '{entry}'")]
    NegativeAmount { field: &'static str, entry: String },
    #[error("budget must be a non-negative number (got {0})")]
    InvalidBudget(f64),
    #[error("{0} is required when no config file is given")]
    MissingArgument(&'static str),
    #[error("principal must be > 0 (got {0})")]
    InvalidPrincipal(f64),
    #[error("annual rate must be a non-negative fraction (got {0})")]
    InvalidAnnualRate(f64),
    #[error("term must be between 1 and {max} years (got {years})")]
    InvalidTerm { years: u32, max: u32 },
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Output(String),
    #[error("{0}")]
    Logging(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;
