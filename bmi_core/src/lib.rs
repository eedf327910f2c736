#![forbid(unsafe_code)]

//! Core domain model and business logic for the BMI tracker.
//!
//! This crate provides:
//! - BMI calculation and categorization
//! - Form input validation
//! - Persistence (append-only JSONL record store)
//! - History and trend queries, gauge data and CSV export

pub mod types;
pub mod error;
pub mod bmi;
pub mod validate;
pub mod config;
pub mod logging;
pub mod store;
pub mod query;
pub mod service;
pub mod gauge;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result, ValidationError};
pub use types::*;
pub use config::Config;
pub use store::{EmailPolicy, JsonlStore, RecordSink};
pub use query::{history_for, latest_for, trend_for};
pub use service::{save, validate_and_compute};
pub use gauge::Gauge;
pub use export::export_history_csv;
