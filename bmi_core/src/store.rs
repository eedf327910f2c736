//! Append-only record store.
//!
//! Records are appended to a JSONL (JSON Lines) file, one [`BmiRecord`] per
//! line, under an exclusive file lock. Identities are assigned by the store
//! while the lock is held.

use crate::{BmiRecord, BmiRecordDraft, Error, Result};
use chrono::{SubsecRound, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Default file name of the record log
pub const RECORDS_FILE: &str = "bmi_records.jsonl";

/// How the store treats a second record for an email it already holds
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmailPolicy {
    /// Any number of records per email, which is what history and trends need
    #[default]
    AllowHistory,
    /// One record per email; later appends fail with [`Error::DuplicateEmail`]
    UniqueRegistration,
}

/// Record sink trait for persisting BMI observations
pub trait RecordSink {
    fn append(&mut self, draft: &BmiRecordDraft) -> Result<BmiRecord>;
}

/// JSONL-based record store with file locking
#[derive(Clone, Debug)]
pub struct JsonlStore {
    path: PathBuf,
    policy: EmailPolicy,
}

impl JsonlStore {
    /// Open the store at `path`, creating the file if it is missing
    pub fn open(path: impl Into<PathBuf>, policy: EmailPolicy) -> Result<Self> {
        let store = Self {
            path: path.into(),
            policy,
        };
        store.init()?;
        Ok(store)
    }

    /// Create the parent directory and an empty record file if absent.
    ///
    /// Safe to call on every start; existing records are never touched.
    pub fn init(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::store)?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(Error::store)?;

        tracing::debug!("Record store ready at {:?}", self.path);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> EmailPolicy {
        self.policy
    }

    /// Read every record in insertion order
    pub fn read_all(&self) -> Result<Vec<BmiRecord>> {
        read_records(&self.path)
    }
}

impl RecordSink for JsonlStore {
    fn append(&mut self, draft: &BmiRecordDraft) -> Result<BmiRecord> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::store)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(Error::store)?;

        // Held until `file` is dropped, on every return path
        file.lock_exclusive().map_err(Error::store)?;

        let contents = read_contents(&file)?;
        let existing = parse_records(&contents);
        if self.policy == EmailPolicy::UniqueRegistration
            && existing.iter().any(|r| r.email == draft.email())
        {
            tracing::warn!("Rejected duplicate email {}", draft.email());
            return Err(Error::DuplicateEmail(draft.email().to_string()));
        }

        let next_id = existing.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = draft
            .clone()
            .into_record(next_id, Utc::now().trunc_subsecs(0));

        // One write of a full line, so a failure leaves at most a torn line
        // that readers skip. A torn tail from an earlier crash is terminated
        // first so it cannot swallow this record.
        let mut line = String::new();
        if !contents.is_empty() && !contents.ends_with('\n') {
            tracing::warn!("Record file {:?} ends with a partial line", self.path);
            line.push('\n');
        }
        line.push_str(&serde_json::to_string(&record).map_err(Error::store)?);
        line.push('\n');

        let mut writer = std::io::BufWriter::new(&file);
        writer.write_all(line.as_bytes()).map_err(Error::store)?;
        writer.flush().map_err(Error::store)?;
        drop(writer);
        file.sync_all().map_err(Error::store)?;

        file.unlock().map_err(Error::store)?;

        tracing::info!("Appended record {} for {}", record.id, record.email);
        Ok(record)
    }
}

/// Read all records from a store file.
///
/// A missing file reads as empty. Lines that fail to parse are logged and
/// skipped.
pub fn read_records(path: &Path) -> Result<Vec<BmiRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(Error::store)?;
    // Acquire shared lock for reading
    file.lock_shared().map_err(Error::store)?;

    let records = parse_records(&read_contents(&file)?);

    file.unlock().map_err(Error::store)?;
    tracing::debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}

fn read_contents(mut file: &File) -> Result<String> {
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(Error::store)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn parse_records(contents: &str) -> Vec<BmiRecord> {
    let mut records = Vec::new();

    for (line_num, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<BmiRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Failed to parse record at line {}: {}", line_num + 1, e);
            }
        }
    }

    records.sort_by_key(|r| r.id);
    records
}
