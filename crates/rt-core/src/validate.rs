//! Field-level checks shared by trip and activity inputs.

use crate::error::{AppError, Result};
use chrono::{DateTime, NaiveDate};

/// Returns the trimmed value when the field is present and not blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Like [`non_blank`] but a missing value is a validation failure.
pub fn required<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str> {
    non_blank(value).ok_or_else(|| AppError::ValidationError(format!("{field} is required")))
}

/// Accepts a calendar date (`2024-01-01`) or a full RFC 3339 timestamp,
/// keeping only the date part of the latter.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.date_naive())
        .map_err(|_| AppError::ValidationError(format!("{field} is not a valid date: '{raw}'")))
}

pub fn required_date(field: &str, value: &Option<String>) -> Result<NaiveDate> {
    parse_date(field, required(field, value)?)
}

pub fn optional_date(field: &str, value: &Option<String>) -> Result<Option<NaiveDate>> {
    non_blank(value).map(|raw| parse_date(field, raw)).transpose()
}

pub fn check_date_order(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(AppError::ValidationError(format!(
            "startDate {start} is after endDate {end}"
        )));
    }
    Ok(())
}

pub fn check_price(price: f64) -> Result<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::ValidationError(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(price)
}
