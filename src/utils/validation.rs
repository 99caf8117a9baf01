use crate::utils::error::{BillingError, Result};
use rust_decimal::Decimal;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(BillingError::InvalidValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BillingError::InvalidValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| BillingError::MissingFieldError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_negative(field_name: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(BillingError::InvalidValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must not be negative".to_string(),
        });
    }
    Ok(())
}

/// Half-open `[0, 1)` check for fractional settings such as discounts.
pub fn validate_fraction(field_name: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(BillingError::InvalidValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be at least 0 and below 1".to_string(),
        });
    }
    Ok(())
}

/// Both present or both absent.
pub fn validate_paired<A, B>(
    first_name: &str,
    first: &Option<A>,
    second_name: &str,
    second: &Option<B>,
) -> Result<()> {
    match (first, second) {
        (Some(_), None) => Err(BillingError::MissingFieldError {
            field: second_name.to_string(),
        }),
        (None, Some(_)) => Err(BillingError::MissingFieldError {
            field: first_name.to_string(),
        }),
        _ => Ok(()),
    }
}
