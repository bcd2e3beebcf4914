use thiserror::Error;

pub type PdResult<T> = Result<T, PdError>;

#[derive(Error, Debug)]
pub enum PdError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
