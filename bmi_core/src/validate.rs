//! Form input validation.
//!
//! Rules run in a fixed order and the first failure is returned:
//! 1. every field is non-empty after trimming
//! 2. the email looks like `local@domain.tld`
//! 3. weight and height parse as finite numbers
//! 4. weight and height are strictly positive

use crate::{RawFields, ValidatedFields, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// Validate all five form fields
pub fn validate(raw: &RawFields) -> Result<ValidatedFields, ValidationError> {
    let name = raw.name.trim();
    let email = raw.email.trim();
    let gender = raw.gender.trim();
    let weight = raw.weight.trim();
    let height = raw.height.trim();

    for (field, value) in [
        ("name", name),
        ("email", email),
        ("gender", gender),
        ("weight", weight),
        ("height", height),
    ] {
        if value.is_empty() {
            return Err(ValidationError::MissingField { field });
        }
    }

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    let weight = parse_number("weight", weight)?;
    let height = parse_number("height", height)?;

    if weight <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field: "weight" });
    }
    if height <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field: "height" });
    }

    Ok(ValidatedFields {
        name: name.to_string(),
        email: email.to_string(),
        gender: gender.to_string(),
        weight,
        height,
    })
}

/// Check an email against the `local@domain.tld` pattern
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    // f64's parser also accepts "inf" and "NaN"
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ValidationError::NotANumber { field }),
    }
}
