use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SplitError>;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Arithmetic anomaly: {0}")]
    ArithmeticAnomaly(String),
    #[error("Balances do not settle to zero (residual {residual})")]
    ResidualImbalance { residual: Decimal },
}
