//! Custom field validators shared by the request types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::ValidationError;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Amounts are kept in whole paise.
pub const AMOUNT_SCALE: u32 = 2;

fn validate_amount_scale(value: &Decimal) -> Result<(), ValidationError> {
    if value.normalize().scale() <= AMOUNT_SCALE {
        Ok(())
    } else {
        Err(error("scale", "must have at most 2 decimal places"))
    }
}

pub fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value > Decimal::ZERO {
        validate_amount_scale(value)
    } else {
        Err(error("positive", "must be greater than zero"))
    }
}

pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO {
        validate_amount_scale(value)
    } else {
        Err(error("non_negative", "must not be negative"))
    }
}

pub fn validate_percent(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO && *value <= Decimal::ONE_HUNDRED {
        Ok(())
    } else {
        Err(error("percent", "must be between 0 and 100"))
    }
}

/// Ten-digit phone number, as captured on the tenant form.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if value.len() == 10 && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(error("phone", "must be a 10 digit phone number"))
    }
}

/// `YYYY-MM`
pub fn validate_month(value: &str) -> Result<(), ValidationError> {
    parse_month(value)
        .map(|_| ())
        .ok_or_else(|| error("month", "must be formatted as YYYY-MM"))
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    let (year, month) = value.trim().split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Strict `YYYY-MM-DD`.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
