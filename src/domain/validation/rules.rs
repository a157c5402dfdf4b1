//! Field-level business rules.

use crate::domain::error::DomainError;
use chrono::NaiveTime;

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 50;
pub const DESCRIPTION_MAX: usize = 1000;
pub const ADDRESS_MIN: usize = 5;
pub const ADDRESS_MAX: usize = 255;

/// Trimmed length of `value`, counted in characters, must fall in `min..=max`.
pub fn length(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), DomainError> {
    let len = value.trim().chars().count();
    if len == 0 && min > 0 {
        return Err(DomainError::validation(field, "must not be blank"));
    }
    if len < min || len > max {
        return Err(DomainError::validation(
            field,
            format!("must be between {min} and {max} characters"),
        ));
    }
    Ok(())
}

pub fn name(value: &str) -> Result<(), DomainError> {
    length("name", value, NAME_MIN, NAME_MAX)
}

pub fn description(value: &str) -> Result<(), DomainError> {
    if value.chars().count() > DESCRIPTION_MAX {
        return Err(DomainError::validation(
            "description",
            format!("must be at most {DESCRIPTION_MAX} characters"),
        ));
    }
    Ok(())
}

pub fn price(value: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DomainError::validation("price", "must be greater than zero"));
    }
    Ok(())
}

pub fn address(value: &str) -> Result<(), DomainError> {
    length("address", value, ADDRESS_MIN, ADDRESS_MAX)
}

/// `HH:MM-HH:MM`, both times valid, start strictly before end.
pub fn opening_hours(value: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::validation("opening_hours", "must look like HH:MM-HH:MM");
    let (start, end) = value.trim().split_once('-').ok_or_else(invalid)?;
    let parse = |raw: &str| {
        let raw = raw.trim();
        if raw.len() != 5 {
            return Err(invalid());
        }
        NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| invalid())
    };
    let (start, end) = (parse(start)?, parse(end)?);
    if start >= end {
        return Err(DomainError::validation(
            "opening_hours",
            "opening time must be before closing time",
        ));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), DomainError> {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !value.contains(' ') => {
            length("email", value, 3, 255)
        }
        _ => Err(DomainError::validation("email", "must be a valid e-mail address")),
    }
}

pub fn login(value: &str) -> Result<(), DomainError> {
    length("login", value, NAME_MIN, NAME_MAX)?;
    if value.chars().any(char::is_whitespace) {
        return Err(DomainError::validation("login", "must not contain whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_bounds_count_characters() {
        assert!(name("Bar").is_ok());
        assert!(name("Açaí").is_ok());
        assert!(name("Ab").is_err());
        assert!(name("   ").is_err());
        assert!(name(&"x".repeat(50)).is_ok());
        assert!(name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn description_may_be_empty_but_bounded() {
        assert!(description("").is_ok());
        assert!(description(&"d".repeat(1000)).is_ok());
        assert!(description(&"d".repeat(1001)).is_err());
    }

    #[test]
    fn price_must_be_positive() {
        assert!(price(0.01).is_ok());
        assert!(price(0.0).is_err());
        assert!(price(-3.0).is_err());
        assert!(price(f64::NAN).is_err());
    }

    #[test]
    fn opening_hours_format_and_order() {
        assert!(opening_hours("08:00-22:00").is_ok());
        assert!(opening_hours("22:00-08:00").is_err());
        assert!(opening_hours("10:00-10:00").is_err());
        assert!(opening_hours("8:00-22:00").is_err());
        assert!(opening_hours("08:00").is_err());
        assert!(opening_hours("25:00-26:00").is_err());
    }

    #[test]
    fn email_and_login() {
        assert!(email("dono@restaurante.com").is_ok());
        assert!(email("dono").is_err());
        assert!(login("garcom01").is_ok());
        assert!(login("gar com").is_err());
    }
}
