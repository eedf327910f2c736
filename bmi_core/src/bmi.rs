//! BMI calculation and categorization.
//!
//! `bmi = weight_kg / (height_cm / 100)^2`
//!
//! Categories are decided on the unrounded value:
//! - `< 18.5` → Underweight
//! - `[18.5, 24.9)` → Normal weight
//! - `[24.9, 29.9)` → Overweight
//! - `>= 29.9` → Obese
//!
//! The reported value is rounded to 2 decimals, half away from zero, judged on
//! the exact binary `f64` (so `0.125` becomes `0.13`, while the literals
//! `1.005` and `25.005`, stored just below the half, become `1.0` and `25.0`).

use crate::{BmiCategory, BmiReading, Error, Result};

const UNDERWEIGHT_BELOW: f64 = 18.5;
const NORMAL_BELOW: f64 = 24.9;
const OVERWEIGHT_BELOW: f64 = 29.9;

/// Compute BMI and category from weight (kg) and height (cm)
pub fn compute(weight: f64, height: f64) -> Result<BmiReading> {
    // Squaring hides the sign, so negative height must be rejected here.
    if !height.is_finite() || height <= 0.0 {
        return Err(Error::InvalidInput(
            "Height cannot be zero or negative.".into(),
        ));
    }
    if !weight.is_finite() || weight <= 0.0 {
        return Err(Error::InvalidInput(
            "Weight cannot be zero or negative.".into(),
        ));
    }

    let height_m = height / 100.0;
    let raw = weight / (height_m * height_m);
    let reading = BmiReading {
        bmi: round_bmi(raw),
        category: categorize(raw),
    };

    tracing::debug!(
        "Computed BMI {} ({}) for {} kg / {} cm",
        reading.bmi,
        reading.category,
        weight,
        height
    );
    Ok(reading)
}

/// Bucket an unrounded BMI value
pub fn categorize(bmi: f64) -> BmiCategory {
    if bmi < UNDERWEIGHT_BELOW {
        BmiCategory::Underweight
    } else if bmi < NORMAL_BELOW {
        BmiCategory::NormalWeight
    } else if bmi < OVERWEIGHT_BELOW {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Round to 2 decimal places, ties away from zero.
///
/// The tie test is done on the exact binary value: `value * 100.0` can round
/// up to a `.5` that the stored value never reached (`25.005` is stored as
/// `25.00499…`), so the distance to the midpoint is taken with a fused
/// multiply-add, whose single rounding keeps the sign exact.
pub fn round_bmi(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let magnitude = value.abs();
    let lower = (magnitude * 100.0).floor();
    let midpoint = lower + 0.5;
    let above_midpoint = magnitude.mul_add(100.0, -midpoint);

    let scaled = if above_midpoint < 0.0 {
        // the product may have rounded up onto the next integer
        midpoint - 0.5
    } else {
        midpoint + 0.5
    };
    (scaled / 100.0).copysign(value)
}
