//! Core domain types for the BMI tracker.
//!
//! This module defines:
//! - Raw and validated form input
//! - BMI categories and readings
//! - Persisted records and the read-side projections used for charts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender labels offered by the entry form. The core stores whatever label it is given.
pub const GENDER_OPTIONS: [&str; 3] = ["Male", "Female", "Other"];

// ============================================================================
// Form Input
// ============================================================================

/// Untouched strings as typed into the form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawFields {
    pub name: String,
    pub email: String,
    pub gender: String,
    pub weight: String,
    pub height: String,
}

/// Trimmed and parsed form input. Weight and height are strictly positive.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedFields {
    pub name: String,
    pub email: String,
    pub gender: String,
    pub weight: f64,
    pub height: f64,
}

// ============================================================================
// BMI
// ============================================================================

/// Qualitative BMI bucket
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obese")]
    Obese,
}

impl BmiCategory {
    /// Human-readable label, also the persisted form
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of the BMI engine
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BmiReading {
    /// Rounded to 2 decimal places
    pub bmi: f64,
    pub category: BmiCategory,
}

// ============================================================================
// Records
// ============================================================================

/// A computed observation that has not been persisted yet.
///
/// Only built by [`BmiRecordDraft::new`] or
/// [`crate::service::validate_and_compute`], both of which run the engine, so
/// `bmi` and `category` always agree with `weight` and `height`.
#[derive(Clone, Debug, PartialEq)]
pub struct BmiRecordDraft {
    user_name: String,
    email: String,
    gender: String,
    weight: f64,
    height: f64,
    reading: BmiReading,
}

impl BmiRecordDraft {
    /// Compute the BMI for `fields` and wrap everything up for saving
    pub fn new(fields: ValidatedFields) -> crate::Result<Self> {
        let reading = crate::bmi::compute(fields.weight, fields.height)?;
        Ok(Self {
            user_name: fields.name,
            email: fields.email,
            gender: fields.gender,
            weight: fields.weight,
            height: fields.height,
            reading,
        })
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn bmi(&self) -> f64 {
        self.reading.bmi
    }

    pub fn category(&self) -> BmiCategory {
        self.reading.category
    }

    /// Attach the identity and creation time assigned by the store
    pub(crate) fn into_record(self, id: u64, timestamp: DateTime<Utc>) -> BmiRecord {
        BmiRecord {
            id,
            user_name: self.user_name,
            email: self.email,
            gender: self.gender,
            weight: self.weight,
            height: self.height,
            bmi: self.reading.bmi,
            category: self.reading.category,
            timestamp,
        }
    }
}

/// One persisted, immutable BMI observation (a line in `bmi_records.jsonl`)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BmiRecord {
    pub id: u64,
    pub user_name: String,
    pub email: String,
    pub gender: String,
    pub weight: f64,
    pub height: f64,
    pub bmi: f64,
    pub category: BmiCategory,
    pub timestamp: DateTime<Utc>,
}

/// Row of a user's history table
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub weight: f64,
    pub height: f64,
    pub bmi: f64,
    pub category: BmiCategory,
}

impl From<&BmiRecord> for HistoryEntry {
    fn from(record: &BmiRecord) -> Self {
        HistoryEntry {
            timestamp: record.timestamp,
            weight: record.weight,
            height: record.height,
            bmi: record.bmi,
            category: record.category,
        }
    }
}

/// Point on the trend line
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub bmi: f64,
}

impl From<&BmiRecord> for TrendPoint {
    fn from(record: &BmiRecord) -> Self {
        TrendPoint {
            timestamp: record.timestamp,
            bmi: record.bmi,
        }
    }
}
