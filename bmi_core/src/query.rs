//! Read-side access to a user's records.
//!
//! Every call goes back to the store file, so results always include all
//! appends that completed before the call. Unknown emails yield empty results.

use crate::store::JsonlStore;
use crate::{BmiRecord, HistoryEntry, Result, TrendPoint};

/// All records for `email`, oldest first
pub fn records_for(store: &JsonlStore, email: &str) -> Result<Vec<BmiRecord>> {
    let records: Vec<BmiRecord> = store
        .read_all()?
        .into_iter()
        .filter(|r| r.email == email)
        .collect();

    tracing::debug!("Found {} records for {}", records.len(), email);
    Ok(records)
}

/// History table rows for `email`, oldest first
pub fn history_for(store: &JsonlStore, email: &str) -> Result<Vec<HistoryEntry>> {
    Ok(records_for(store, email)?
        .iter()
        .map(HistoryEntry::from)
        .collect())
}

/// Trend line points for `email`, oldest first
pub fn trend_for(store: &JsonlStore, email: &str) -> Result<Vec<TrendPoint>> {
    Ok(records_for(store, email)?
        .iter()
        .map(TrendPoint::from)
        .collect())
}

/// Most recent record for `email`, if any
pub fn latest_for(store: &JsonlStore, email: &str) -> Result<Option<BmiRecord>> {
    Ok(records_for(store, email)?.pop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EmailPolicy, RecordSink, RECORDS_FILE};
    use crate::{BmiCategory, BmiRecordDraft, ValidatedFields};

    fn draft(email: &str, weight: f64) -> BmiRecordDraft {
        BmiRecordDraft::new(ValidatedFields {
            name: "Test User".into(),
            email: email.into(),
            gender: "Male".into(),
            weight,
            height: 175.0,
        })
        .unwrap()
    }

    fn store() -> (tempfile::TempDir, JsonlStore) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store =
            JsonlStore::open(temp_dir.path().join(RECORDS_FILE), EmailPolicy::AllowHistory)
                .unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_history_last_entry_matches_append() {
        let (_dir, mut store) = store();
        store.append(&draft("a@example.com", 70.0)).unwrap();
        let saved = store.append(&draft("a@example.com", 90.0)).unwrap();

        let history = history_for(&store, "a@example.com").unwrap();
        assert_eq!(history.len(), 2);

        let last = history.last().unwrap();
        assert_eq!(last.weight, saved.weight);
        assert_eq!(last.height, saved.height);
        assert_eq!(last.bmi, 29.39);
        assert_eq!(last.category, BmiCategory::Overweight);
        assert_eq!(last.timestamp, saved.timestamp);
    }

    #[test]
    fn test_results_filtered_by_email_in_insertion_order() {
        let (_dir, mut store) = store();
        store.append(&draft("a@example.com", 50.0)).unwrap();
        store.append(&draft("b@example.com", 120.0)).unwrap();
        store.append(&draft("a@example.com", 70.0)).unwrap();
        store.append(&draft("a@example.com", 90.0)).unwrap();

        let trend = trend_for(&store, "a@example.com").unwrap();
        let bmis: Vec<f64> = trend.iter().map(|p| p.bmi).collect();
        assert_eq!(bmis, vec![16.33, 22.86, 29.39]);
        assert!(trend.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        let ids: Vec<u64> = records_for(&store, "a@example.com")
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_unknown_email_is_empty() {
        let (_dir, mut store) = store();
        assert!(history_for(&store, "nobody@example.com").unwrap().is_empty());
        assert!(trend_for(&store, "nobody@example.com").unwrap().is_empty());

        store.append(&draft("a@example.com", 70.0)).unwrap();
        assert!(history_for(&store, "nobody@example.com").unwrap().is_empty());
        assert!(trend_for(&store, "nobody@example.com").unwrap().is_empty());
        assert!(latest_for(&store, "nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_latest_for() {
        let (_dir, mut store) = store();
        store.append(&draft("a@example.com", 70.0)).unwrap();
        let newest = store.append(&draft("a@example.com", 72.0)).unwrap();

        assert_eq!(latest_for(&store, "a@example.com").unwrap(), Some(newest));
    }
}
