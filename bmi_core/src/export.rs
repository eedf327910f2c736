//! CSV export of a user's history.
//!
//! The file is written to a temp file next to the target, synced, then renamed
//! into place, so an interrupted export never leaves a half-written CSV.

use crate::store::JsonlStore;
use crate::{Error, HistoryEntry, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    date: String,
    weight_kg: f64,
    height_cm: f64,
    bmi: f64,
    category: &'static str,
}

impl From<&HistoryEntry> for CsvRow {
    fn from(entry: &HistoryEntry) -> Self {
        CsvRow {
            date: entry.timestamp.to_rfc3339(),
            weight_kg: entry.weight,
            height_cm: entry.height,
            bmi: entry.bmi,
            category: entry.category.label(),
        }
    }
}

/// Write the history of `email` to `out_path` as CSV
///
/// Returns the number of rows written (headers excluded). An email with no
/// records produces a file holding only the header.
pub fn export_history_csv(store: &JsonlStore, email: &str, out_path: &Path) -> Result<usize> {
    let history = crate::query::history_for(store, email)?;

    let parent = match out_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp.as_file());
        writer.write_record(["date", "weight_kg", "height_cm", "bmi", "category"])?;
        for entry in &history {
            writer.serialize(CsvRow::from(entry))?;
        }
        writer.flush()?;
    }
    temp.as_file().flush()?;
    temp.as_file().sync_all()?;

    temp.persist(out_path).map_err(|e| Error::Io(e.error))?;

    tracing::info!(
        "Exported {} records for {} to {:?}",
        history.len(),
        email,
        out_path
    );
    Ok(history.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EmailPolicy, RecordSink, RECORDS_FILE};
    use crate::{BmiRecordDraft, ValidatedFields};

    fn draft(email: &str, weight: f64) -> BmiRecordDraft {
        BmiRecordDraft::new(ValidatedFields {
            name: "Test User".into(),
            email: email.into(),
            gender: "Female".into(),
            weight,
            height: 175.0,
        })
        .unwrap()
    }

    #[test]
    fn test_export_writes_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store =
            JsonlStore::open(temp_dir.path().join(RECORDS_FILE), EmailPolicy::AllowHistory)
                .unwrap();
        store.append(&draft("a@example.com", 70.0)).unwrap();
        store.append(&draft("b@example.com", 80.0)).unwrap();
        store.append(&draft("a@example.com", 90.0)).unwrap();

        let out = temp_dir.path().join("exports").join("a.csv");
        let count = export_history_csv(&store, "a@example.com", &out).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&out).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["date", "weight_kg", "height_cm", "bmi", "category"]
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "22.86");
        assert_eq!(&rows[0][4], "Normal weight");
        assert_eq!(&rows[1][4], "Overweight");
    }

    #[test]
    fn test_export_unknown_email_writes_header_only() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store =
            JsonlStore::open(temp_dir.path().join(RECORDS_FILE), EmailPolicy::AllowHistory)
                .unwrap();

        let out = temp_dir.path().join("empty.csv");
        assert_eq!(export_history_csv(&store, "x@example.com", &out).unwrap(), 0);

        let contents = std::fs::read_to_string(&out).unwrap();
        assert_eq!(contents.trim(), "date,weight_kg,height_cm,bmi,category");
    }
}
