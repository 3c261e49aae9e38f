//! The plain-text task manifest.
//!
//! One task name per line. The manifest is written after every change to
//! the pending list and edited by hand in between: deleting a line marks
//! that task as done.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{DocumentKind, Result, TaskRewardError};
use crate::record::StagedWrite;

/// Render tasks as manifest text, one per line, in the given order.
#[must_use]
pub fn render(tasks: &[String]) -> String {
    tasks.iter().map(|t| format!("{t}\n")).collect()
}

/// Parse manifest text into task names.
///
/// Trailing whitespace is stripped and blank lines are skipped.
#[must_use]
pub fn parse(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read the manifest, failing with `MissingDocument` if it is absent.
pub fn read(path: &Path) -> Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(parse(&contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TaskRewardError::missing(DocumentKind::Manifest, path))
        }
        Err(e) => Err(e.into()),
    }
}

/// Write `tasks` to the manifest's temp file, ready to be committed.
pub fn stage(path: &Path, tasks: &[String]) -> Result<StagedWrite> {
    let staged = StagedWrite::stage(path, render(tasks).as_bytes())?;
    debug!(count = tasks.len(), "Staged manifest for {}", path.display());
    Ok(staged)
}

/// Replace the manifest with `tasks`.
pub fn write(path: &Path, tasks: &[String]) -> Result<()> {
    stage(path, tasks)?.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_one_task_per_line() {
        let tasks = vec!["run 5k".to_string(), "read".to_string()];
        assert_eq!(render(&tasks), "run 5k\nread\n");
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_parse_strips_trailing_whitespace_and_blanks() {
        let parsed = parse("run 5k  \r\n\nread\n   \n");
        assert_eq!(parsed, vec!["run 5k".to_string(), "read".to_string()]);
    }

    #[test]
    fn test_parse_keeps_leading_whitespace() {
        assert_eq!(parse("  indented\n"), vec!["  indented".to_string()]);
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("task.txt");
        let tasks = vec!["b".to_string(), "a".to_string()];

        write(&path, &tasks).unwrap();
        assert_eq!(read(&path).unwrap(), tasks);
    }

    #[test]
    fn test_write_leaves_no_side_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("task.txt");

        write(&path, &["a".to_string()]).unwrap();
        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("task.txt")]);
    }

    #[test]
    fn test_read_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = read(&temp_dir.path().join("task.txt")).unwrap_err();
        assert!(matches!(
            err,
            TaskRewardError::MissingDocument {
                kind: DocumentKind::Manifest,
                ..
            }
        ));
    }
}
