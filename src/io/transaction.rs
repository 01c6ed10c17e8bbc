//! A batch of file writes, executed target by target.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::LmtError;

/// Counter for unique temporary file names.
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// How a target compares with what is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The file does not exist yet.
    New,
    /// The file exists with different content.
    Changed,
    /// The file already has exactly the proposed content.
    Unchanged,
}

/// Write `content` to `path`, creating parent directories as needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAction {
    /// Target file path.
    pub path: PathBuf,
    /// Content to write.
    pub content: String,
}

impl WriteAction {
    /// Creates a new write action.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Compares the proposed content with the file on disk.
    pub fn status(&self) -> FileStatus {
        match fs::read(&self.path) {
            Ok(existing) if existing == self.content.as_bytes() => FileStatus::Unchanged,
            Ok(_) => FileStatus::Changed,
            Err(_) => FileStatus::New,
        }
    }

    /// Writes the file unless it is already up to date.
    pub fn execute(&self) -> io::Result<FileStatus> {
        let status = self.status();
        if status == FileStatus::Unchanged {
            return Ok(status);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        atomic_write(&self.path, &self.content)?;
        Ok(status)
    }

    /// Returns a description of this action.
    pub fn describe(&self) -> String {
        let verb = match self.status() {
            FileStatus::New => "create",
            FileStatus::Changed => "write",
            FileStatus::Unchanged => "keep",
        };
        format!("{} {}", verb, self.path.display())
    }
}

/// Outcome of executing a transaction.
#[derive(Debug, Default)]
pub struct Report {
    /// Files created or rewritten.
    pub written: Vec<PathBuf>,
    /// Files left alone because their content was already current.
    pub unchanged: Vec<PathBuf>,
    /// Files that could not be written, with the reason.
    pub failed: Vec<(PathBuf, LmtError)>,
}

impl Report {
    /// Returns true if every action succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// An ordered collection of write actions.
#[derive(Debug, Default)]
pub struct Transaction {
    actions: Vec<WriteAction>,
}

impl Transaction {
    /// Creates a new empty transaction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a write action.
    pub fn write(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.actions.push(WriteAction::new(path, content));
    }

    /// Returns the actions in order.
    pub fn actions(&self) -> &[WriteAction] {
        &self.actions
    }

    /// Returns the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if there are no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns descriptions of all actions.
    pub fn describe(&self) -> Vec<String> {
        self.actions.iter().map(WriteAction::describe).collect()
    }

    /// Executes every action. A failing target is recorded and the remaining
    /// targets are still written.
    pub fn execute(&self) -> Report {
        let mut report = Report::default();

        for action in &self.actions {
            match action.execute() {
                Ok(FileStatus::Unchanged) => {
                    tracing::debug!("{} is up to date", action.path.display());
                    report.unchanged.push(action.path.clone());
                }
                Ok(_) => {
                    tracing::info!("Wrote {}", action.path.display());
                    report.written.push(action.path.clone());
                }
                Err(e) => {
                    tracing::error!("Cannot write {}: {}", action.path.display(), e);
                    report.failed.push((action.path.clone(), e.into()));
                }
            }
        }

        report
    }
}

/// Writes via a temporary file in the same directory, then renames.
fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_path = parent.join(format!(".lmt-tmp-{}-{}", std::process::id(), counter));

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a/b/c.go");

        let action = WriteAction::new(&path, "package c\n");
        assert_eq!(action.status(), FileStatus::New);
        assert_eq!(action.execute().unwrap(), FileStatus::New);

        assert_eq!(fs::read_to_string(&path).unwrap(), "package c\n");
    }

    #[test]
    fn test_unchanged_file_is_not_rewritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("same.txt");
        fs::write(&path, "same").unwrap();

        let action = WriteAction::new(&path, "same");
        assert_eq!(action.execute().unwrap(), FileStatus::Unchanged);
        assert_eq!(action.describe(), format!("keep {}", path.display()));
    }

    #[test]
    fn test_changed_file_is_rewritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.txt");
        fs::write(&path, "original").unwrap();

        let action = WriteAction::new(&path, "updated");
        assert_eq!(action.execute().unwrap(), FileStatus::Changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_failure_does_not_stop_other_targets() {
        let dir = tempdir().unwrap();
        // A regular file where a directory is needed.
        fs::write(dir.path().join("blocker"), "").unwrap();

        let mut transaction = Transaction::new();
        transaction.write(dir.path().join("blocker/x.txt"), "x");
        transaction.write(dir.path().join("ok.txt"), "ok");

        let report = transaction.execute();
        assert!(!report.is_success());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.written, vec![dir.path().join("ok.txt")]);
        assert_eq!(fs::read_to_string(dir.path().join("ok.txt")).unwrap(), "ok");
    }

    #[test]
    fn test_describe() {
        let dir = tempdir().unwrap();
        let mut transaction = Transaction::new();
        transaction.write(dir.path().join("new.txt"), "x");

        assert_eq!(transaction.len(), 1);
        assert_eq!(
            transaction.describe(),
            vec![format!("create {}", dir.path().join("new.txt").display())]
        );
    }
}
