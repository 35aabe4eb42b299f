//! Flat-file record store
//!
//! Persists the record set as a tabular file with a fixed 7-column header,
//! one record per row, dates in `YYYY-MM-DD`. The whole set is the unit of
//! durability: every mutation is a full read-modify-write, and after any
//! call returns, the new full set is what [`RecordStore::load`] will return
//! next.
//!
//! Rows failing the strict parse (bad date, bad numeric field, wrong column
//! count) are dropped silently at load; the system degrades to fewer rows
//! rather than refusing to start.
//!
//! Record ids are content-derived (UUID v5 over row position and row text),
//! so they are stable across processes until the file is rewritten, and
//! stable under any in-memory re-sorting or filtering. A mutation rewrites
//! the file; callers re-list before deleting again.

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::EngineError;
use crate::types::{Activity, SessionRecord};

/// Fixed persisted column layout, no embedded schema version
pub const CSV_HEADER: &str = "date,activity,duration_minutes,intensity,mood,sleep_hours,comment";

/// Store for one flat record file
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records with validated types; malformed rows are dropped.
    /// A missing file is the empty set, created on first mutation.
    pub fn load(&self) -> Result<Vec<SessionRecord>, EngineError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut records = Vec::new();
        for (index, line) in content.lines().skip(1).enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(record) = parse_row(index, line) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Append a validated record and rewrite the full set.
    ///
    /// Returns the record with its assigned id. The entry invariant (a
    /// session must describe something) is enforced here as well as at
    /// construction, so an invalid record never reaches the file.
    pub fn append(&self, record: SessionRecord) -> Result<SessionRecord, EngineError> {
        if record.duration_minutes == 0 && record.sleep_hours == 0.0 {
            return Err(EngineError::EmptyRecord);
        }

        let mut records = self.load()?;

        // Assign the id the next load will derive for this row
        let mut appended = record;
        appended.id = row_id(records.len(), &format_row(&appended));

        records.push(appended.clone());
        self.replace_all(&records)?;
        Ok(appended)
    }

    /// Delete one record by id. Deleting an unknown id is a no-op; returns
    /// whether a row was actually removed.
    pub fn delete(&self, id: Uuid) -> Result<bool, EngineError> {
        let records = self.load()?;
        let before = records.len();
        let kept: Vec<SessionRecord> = records.into_iter().filter(|r| r.id != id).collect();
        let removed = kept.len() != before;
        if removed {
            self.replace_all(&kept)?;
        }
        Ok(removed)
    }

    /// Delete several records at once; unknown ids are ignored
    pub fn delete_many(&self, ids: &[Uuid]) -> Result<usize, EngineError> {
        let records = self.load()?;
        let before = records.len();
        let kept: Vec<SessionRecord> = records
            .into_iter()
            .filter(|r| !ids.contains(&r.id))
            .collect();
        let removed = before - kept.len();
        if removed > 0 {
            self.replace_all(&kept)?;
        }
        Ok(removed)
    }

    /// Wipe the full record set, keeping the header in place
    pub fn clear(&self) -> Result<(), EngineError> {
        self.replace_all(&[])
    }

    /// Rewrite the file with exactly these records
    pub fn replace_all(&self, records: &[SessionRecord]) -> Result<(), EngineError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, to_csv(records))?;
        Ok(())
    }
}

/// Serialize records to the persisted tabular layout. Also used for the
/// filtered-export feature, so the output matches the on-disk format.
pub fn to_csv(records: &[SessionRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&format_row(record));
        out.push('\n');
    }
    out
}

fn format_row(record: &SessionRecord) -> String {
    [
        record.date.format("%Y-%m-%d").to_string(),
        record.activity.label().to_string(),
        record.duration_minutes.to_string(),
        record.intensity.to_string(),
        record.mood.to_string(),
        record.sleep_hours.to_string(),
        record.comment.clone(),
    ]
    .into_iter()
    .map(|field| escape_field(&field))
    .collect::<Vec<_>>()
    .join(",")
}

fn parse_row(index: usize, line: &str) -> Option<SessionRecord> {
    let fields = split_fields(line);
    if fields.len() != 7 {
        return None;
    }

    let date = NaiveDate::parse_from_str(&fields[0], "%Y-%m-%d").ok()?;
    let activity = Activity::from_label(&fields[1]);
    let duration_minutes: u32 = fields[2].parse().ok()?;
    let intensity: u8 = fields[3].parse().ok()?;
    let mood: u8 = fields[4].parse().ok()?;
    let sleep_hours: f64 = fields[5].parse().ok()?;

    if !(1..=5).contains(&intensity) || !(1..=5).contains(&mood) {
        return None;
    }
    if !(0.0..=24.0).contains(&sleep_hours) {
        return None;
    }

    Some(SessionRecord {
        id: row_id(index, line),
        date,
        activity,
        duration_minutes,
        intensity,
        mood,
        sleep_hours,
        comment: fields[6].clone(),
    })
}

fn row_id(index: usize, line: &str) -> Uuid {
    let name = format!("{index}:{line}");
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}

fn escape_field(value: &str) -> String {
    let needs_quotes = value.contains(',') || value.contains('"');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }
    fields.push(field);
    fields
}
