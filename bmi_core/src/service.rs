//! Entry points for the presentation layer.
//!
//! A form submission is `validate_and_compute` followed by `save`. Nothing is
//! persisted unless both succeed.

use crate::store::RecordSink;
use crate::{BmiRecord, BmiRecordDraft, RawFields, Result};

/// Validate raw form input and compute its BMI
pub fn validate_and_compute(raw: &RawFields) -> Result<BmiRecordDraft> {
    let fields = crate::validate::validate(raw)?;
    BmiRecordDraft::new(fields)
}

/// Persist a computed draft
pub fn save(sink: &mut impl RecordSink, draft: &BmiRecordDraft) -> Result<BmiRecord> {
    sink.append(draft)
}
