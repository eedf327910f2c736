//! Data behind the BMI gauge.
//!
//! The gauge spans `0..40` with one colored band per category and shows the
//! distance from the upper bound of the normal range. Rendering is left to the
//! caller.

use crate::{BmiCategory, BmiReading};

/// Upper end of the gauge axis
pub const AXIS_MAX: f64 = 40.0;

/// Reference value the delta is measured against
pub const REFERENCE_BMI: f64 = 24.9;

/// A colored section of the gauge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeBand {
    pub start: f64,
    pub end: f64,
    pub category: BmiCategory,
    /// Hex color, e.g. `#2ca02c`
    pub color: &'static str,
}

pub const BANDS: [GaugeBand; 4] = [
    GaugeBand {
        start: 0.0,
        end: 18.5,
        category: BmiCategory::Underweight,
        color: "#ff7f0e",
    },
    GaugeBand {
        start: 18.5,
        end: 24.9,
        category: BmiCategory::NormalWeight,
        color: "#2ca02c",
    },
    GaugeBand {
        start: 24.9,
        end: 29.9,
        category: BmiCategory::Overweight,
        color: "#ffcc00",
    },
    GaugeBand {
        start: 29.9,
        end: AXIS_MAX,
        category: BmiCategory::Obese,
        color: "#d62728",
    },
];

/// Gauge reading for one BMI value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gauge {
    /// The BMI as given
    pub value: f64,
    /// Needle position, clamped to `0..=AXIS_MAX`
    pub needle: f64,
    /// `value - REFERENCE_BMI`
    pub delta: f64,
    pub band: GaugeBand,
}

impl Gauge {
    /// Gauge for a computed reading.
    ///
    /// The band comes from the reading's category rather than from `bmi`:
    /// `bmi` is rounded and can sit on the far side of a threshold the
    /// unrounded value never crossed.
    pub fn for_reading(reading: BmiReading) -> Self {
        let band = band_for(reading.category);

        Gauge {
            value: reading.bmi,
            needle: needle_position(reading.bmi),
            delta: crate::bmi::round_bmi(reading.bmi - REFERENCE_BMI),
            band,
        }
    }

    /// Needle position as a fraction of the axis
    pub fn fraction(&self) -> f64 {
        self.needle / AXIS_MAX
    }
}

/// The colored section belonging to `category`
pub fn band_for(category: BmiCategory) -> GaugeBand {
    BANDS
        .iter()
        .copied()
        .find(|b| b.category == category)
        .unwrap_or(BANDS[BANDS.len() - 1])
}

/// `bmi` clamped to `0..=AXIS_MAX`
pub fn needle_position(bmi: f64) -> f64 {
    bmi.clamp(0.0, AXIS_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge(weight: f64, height: f64) -> Gauge {
        Gauge::for_reading(crate::bmi::compute(weight, height).unwrap())
    }

    #[test]
    fn test_bands_follow_categories() {
        assert_eq!(gauge(50.0, 175.0).band.category, BmiCategory::Underweight);
        assert_eq!(gauge(70.0, 175.0).band.category, BmiCategory::NormalWeight);
        assert_eq!(gauge(90.0, 175.0).band.category, BmiCategory::Overweight);
        assert_eq!(gauge(120.0, 175.0).band.category, BmiCategory::Obese);
        assert_eq!(band_for(BmiCategory::NormalWeight).color, "#2ca02c");
    }

    #[test]
    fn test_band_matches_category_when_rounding_crosses_threshold() {
        // 24.899 rounds to 24.9 but is still normal weight
        let reading = gauge(24.899, 100.0);
        assert_eq!(reading.value, 24.9);
        assert_eq!(reading.band.category, BmiCategory::NormalWeight);

        // 18.4999 rounds to 18.5 but is still underweight
        let reading = gauge(18.4999, 100.0);
        assert_eq!(reading.value, 18.5);
        assert_eq!(reading.band.category, BmiCategory::Underweight);
    }

    #[test]
    fn test_bands_agree_with_engine() {
        let mut weight = 30.0;
        while weight < 130.0 {
            let reading = crate::bmi::compute(weight, 175.0).unwrap();
            assert_eq!(
                Gauge::for_reading(reading).band.category,
                reading.category,
                "disagreement at {} kg",
                weight
            );
            weight += 0.05;
        }
    }

    #[test]
    fn test_needle_is_clamped() {
        let high = Gauge::for_reading(BmiReading {
            bmi: 55.2,
            category: BmiCategory::Obese,
        });
        assert_eq!(high.needle, AXIS_MAX);
        assert_eq!(high.value, 55.2);
        assert_eq!(high.band.category, BmiCategory::Obese);
        assert_eq!(high.fraction(), 1.0);
        assert_eq!(needle_position(-1.0), 0.0);
    }

    #[test]
    fn test_delta_from_reference() {
        assert_eq!(gauge(70.0, 175.0).delta, -2.04);
        assert_eq!(gauge(90.0, 175.0).delta, 4.49);
    }
}
