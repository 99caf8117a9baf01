use crate::domain::model::{CustomerId, Rate, RateId};
use chrono::NaiveDateTime;
use thiserror::Error;

/// Broad classes of failure, so callers can react differently to a bad
/// request than to a catalog that is not ready yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Integrity,
    NotFound,
    NotReady,
    Configuration,
    System,
}

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Session start {start} has to be before end {end}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Two basic rates are not allowed")]
    DuplicateBasicRate,

    #[error("Rate causing violations: {conflicting}")]
    WindowConflict { conflicting: Rate },

    #[error("Customer with id {id} does not exist")]
    NoSuchCustomer { id: CustomerId },

    #[error("Rate with id {id} does not exist")]
    NoSuchRate { id: RateId },

    #[error("Rate data incomplete: {message}")]
    RateDataIncomplete { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BillingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BillingError::InvalidRange { .. }
            | BillingError::InvalidValueError { .. }
            | BillingError::MissingFieldError { .. } => ErrorKind::InvalidInput,
            BillingError::DuplicateBasicRate | BillingError::WindowConflict { .. } => {
                ErrorKind::Integrity
            }
            BillingError::NoSuchCustomer { .. } | BillingError::NoSuchRate { .. } => {
                ErrorKind::NotFound
            }
            BillingError::RateDataIncomplete { .. } => ErrorKind::NotReady,
            BillingError::ConfigValidationError { .. } => ErrorKind::Configuration,
            BillingError::IoError(_) | BillingError::SerializationError(_) => ErrorKind::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidInput => "Check the request values and try again",
            ErrorKind::Integrity => {
                "Remove or adjust the conflicting rate before saving this one"
            }
            ErrorKind::NotFound => "Verify the identifier refers to an existing record",
            ErrorKind::NotReady => "Define a basic rate before pricing sessions",
            ErrorKind::Configuration => "Fix the configuration file and restart",
            ErrorKind::System => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, BillingError>;
