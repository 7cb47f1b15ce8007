// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Changeset file writing.
//!
//! Writes are sequential and each is durable once completed; a failure
//! aborts the remaining batch without rolling back earlier files. Existing
//! files are never overwritten: identical content means the changeset is
//! already covered (a re-run on an unchanged PR), anything else is a slug
//! collision and gets a disambiguated name.

use std::path::{Path, PathBuf};

use crate::error::{RenderError, Result};

use super::slug::content_digest;
use super::ChangesetRecord;

/// What a write batch did.
#[derive(Debug, Default)]
pub struct WriteOutcome {
    /// Paths of changeset files created in this run.
    pub written: Vec<PathBuf>,

    /// Paths skipped because an identical changeset already existed.
    pub skipped: Vec<PathBuf>,
}

/// Write each record into the changeset directory.
pub fn write_changesets(records: &[ChangesetRecord], dir: &Path) -> Result<WriteOutcome> {
    std::fs::create_dir_all(dir).map_err(|e| RenderError::WriteFailed {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut outcome = WriteOutcome::default();

    for record in records {
        let content = record.to_file_content();
        match resolve_target(dir, record, &content)? {
            Target::Exists(path) => {
                tracing::debug!(
                    "Changeset for '{}' already covered by {:?}",
                    record.update_type,
                    path
                );
                outcome.skipped.push(path);
            }
            Target::Fresh(path) => {
                std::fs::write(&path, &content).map_err(|e| RenderError::WriteFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                tracing::debug!("Wrote changeset {:?}", path);
                outcome.written.push(path);
            }
        }
    }

    Ok(outcome)
}

enum Target {
    /// An identical changeset file already exists at this path.
    Exists(PathBuf),
    /// This path is free to write.
    Fresh(PathBuf),
}

/// Pick the path for a record without ever clobbering a different file.
///
/// The deterministic slug is tried first; on a content mismatch (another
/// branch's changeset hashed to the same words) a content-digest suffix
/// disambiguates.
fn resolve_target(dir: &Path, record: &ChangesetRecord, content: &str) -> Result<Target> {
    let primary = dir.join(record.file_name());
    match read_if_exists(&primary)? {
        None => return Ok(Target::Fresh(primary)),
        Some(existing) if existing == content => return Ok(Target::Exists(primary)),
        Some(_) => {}
    }

    let suffixed = dir.join(format!("{}-{}.md", record.slug, content_digest(content)));
    match read_if_exists(&suffixed)? {
        None => Ok(Target::Fresh(suffixed)),
        Some(existing) if existing == content => Ok(Target::Exists(suffixed)),
        Some(_) => Err(RenderError::WriteFailed {
            path: suffixed,
            message: "refusing to overwrite existing changeset".to_string(),
        }
        .into()),
    }
}

fn read_if_exists(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|e| {
            RenderError::WriteFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BumpLevel;
    use tempfile::TempDir;

    fn record(slug: &str, message: &str) -> ChangesetRecord {
        ChangesetRecord {
            package: "my-app".to_string(),
            bump: BumpLevel::Patch,
            message: message.to_string(),
            slug: slug.to_string(),
            update_type: "npm".to_string(),
        }
    }

    #[test]
    fn test_writes_records() {
        let dir = TempDir::new().unwrap();
        let records = vec![record("renoset-a-b-c", "msg one"), record("renoset-d-e-f", "msg two")];

        let outcome = write_changesets(&records, dir.path()).unwrap();
        assert_eq!(outcome.written.len(), 2);
        assert!(outcome.skipped.is_empty());
        for path in &outcome.written {
            assert!(path.exists());
        }
    }

    #[test]
    fn test_creates_changeset_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join(".changeset");
        write_changesets(&[record("renoset-a-b-c", "msg")], &nested).unwrap();
        assert!(nested.join("renoset-a-b-c.md").exists());
    }

    #[test]
    fn test_rerun_skips_identical() {
        let dir = TempDir::new().unwrap();
        let records = vec![record("renoset-a-b-c", "msg")];

        let first = write_changesets(&records, dir.path()).unwrap();
        assert_eq!(first.written.len(), 1);

        let second = write_changesets(&records, dir.path()).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.skipped.len(), 1);

        // Only one file ever exists.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_collision_gets_suffixed_name() {
        let dir = TempDir::new().unwrap();
        write_changesets(&[record("renoset-a-b-c", "from branch one")], dir.path()).unwrap();

        let outcome =
            write_changesets(&[record("renoset-a-b-c", "from branch two")], dir.path()).unwrap();
        assert_eq!(outcome.written.len(), 1);
        let written = &outcome.written[0];
        assert_ne!(written, &dir.path().join("renoset-a-b-c.md"));

        // The original file is untouched.
        let original = std::fs::read_to_string(dir.path().join("renoset-a-b-c.md")).unwrap();
        assert!(original.contains("from branch one"));
    }

    #[test]
    fn test_write_failure_aborts_batch() {
        let dir = TempDir::new().unwrap();
        // A directory squatting on the target path forces a write error.
        std::fs::create_dir_all(dir.path().join("renoset-a-b-c.md")).unwrap();

        let records = vec![record("renoset-a-b-c", "msg"), record("renoset-d-e-f", "msg")];
        let err = write_changesets(&records, dir.path()).unwrap_err();
        assert!(err.to_string().contains("renoset-a-b-c"));
        assert!(!dir.path().join("renoset-d-e-f.md").exists());
    }
}
