use std::fs;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::ProgressStoreError;
use crate::paths::{progress_file, progress_root};
use crate::schema::ProgressRecord;

/// Single-record progress file under the working directory.
///
/// Missing file means a fresh game; a record that fails validation is an
/// error for the caller to downgrade as it sees fit.
pub struct ProgressStore {
    root: PathBuf,
    path: PathBuf,
}

impl ProgressStore {
    #[must_use]
    pub fn at(cwd: &Path) -> Self {
        Self {
            root: progress_root(cwd),
            path: progress_file(cwd),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted record, if any.
    pub fn load(&self) -> Result<Option<ProgressRecord>, ProgressStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(ProgressStoreError::io(
                    "reading progress file",
                    &self.path,
                    err,
                ))
            }
        };

        let record: ProgressRecord = serde_json::from_str(&raw)
            .map_err(|source| ProgressStoreError::parse(&self.path, source))?;
        self.validate(&record)?;
        Ok(Some(record))
    }

    /// Write a fresh record stamped with the current UTC time.
    pub fn save(
        &self,
        stage_index: usize,
        score: u32,
        hint_count: u32,
    ) -> Result<ProgressRecord, ProgressStoreError> {
        let updated_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(ProgressStoreError::ClockFormat)?;
        let record = ProgressRecord::v1(stage_index, score, hint_count, updated_at);

        fs::create_dir_all(&self.root).map_err(|source| {
            ProgressStoreError::io("creating progress directory", &self.root, source)
        })?;

        let json = serde_json::to_string_pretty(&record)
            .map_err(|source| ProgressStoreError::serialize(&self.path, source))?;
        fs::write(&self.path, json)
            .map_err(|source| ProgressStoreError::io("writing progress file", &self.path, source))?;

        Ok(record)
    }

    /// Remove the persisted record. Missing file is not an error.
    pub fn clear(&self) -> Result<(), ProgressStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ProgressStoreError::io(
                "removing progress file",
                &self.path,
                err,
            )),
        }
    }

    fn validate(&self, record: &ProgressRecord) -> Result<(), ProgressStoreError> {
        if record.version != 1 {
            return Err(ProgressStoreError::UnsupportedVersion {
                path: self.path.clone(),
                found: record.version,
            });
        }

        if OffsetDateTime::parse(&record.updated_at, &Rfc3339).is_err() {
            return Err(ProgressStoreError::InvalidTimestamp {
                path: self.path.clone(),
                field: "updated_at",
                value: record.updated_at.clone(),
            });
        }

        Ok(())
    }
}
