//! Record persistence with staged, atomic file replacement.
//!
//! Writes happen in two steps. [`StagedWrite::stage`] writes and fsyncs
//! `<path>.tmp`; [`RecordStore::commit`] then renames every staged file into
//! place under an exclusive lock. An operation that changes several
//! documents stages all of them first, so a failure while staging leaves
//! every document untouched.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, info, warn};

use super::Record;
use crate::error::{DocumentKind, Result, TaskRewardError};

/// Temporary file suffix for atomic writes.
const TMP_SUFFIX: &str = ".tmp";

/// Directory beside the record that holds the lock file.
const LOCK_DIR: &str = ".tasknreward";

/// Lock file name inside [`LOCK_DIR`].
const LOCK_FILE: &str = "lock";

/// Loads, creates and saves the record document at a fixed path.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl RecordStore {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let lock_path = path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(LOCK_DIR)
            .join(LOCK_FILE);
        Self { path, lock_path }
    }

    /// Path of the record document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the advisory lock shared by every document commit.
    #[must_use]
    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// Checks if the record document exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the record, failing with `MissingDocument` if it is absent.
    pub fn load(&self) -> Result<Record> {
        let _lock = if self.lock_path.exists() {
            Some(DocumentLock::shared(&self.lock_path)?)
        } else {
            None
        };

        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TaskRewardError::missing(DocumentKind::Record, &self.path));
            }
            Err(e) => return Err(e.into()),
        };

        let record: Record = serde_json::from_str(&contents)?;
        debug!("Loaded record from {}", self.path.display());
        Ok(record)
    }

    /// Loads the record, writing a default one first if none exists.
    ///
    /// Returns the record and whether it was just created.
    pub fn load_or_create(&self, daily_reset_limit: u32) -> Result<(Record, bool)> {
        if self.exists() {
            return Ok((self.load()?, false));
        }

        let record = Record::new(daily_reset_limit);
        self.save(&record)?;
        info!("Created score record at {}", self.path.display());
        Ok((record, true))
    }

    /// Saves the record atomically.
    pub fn save(&self, record: &Record) -> Result<()> {
        self.commit(vec![self.stage(record)?])
    }

    /// Write the record to its temp file without replacing the document.
    pub fn stage(&self, record: &Record) -> Result<StagedWrite> {
        let json = serde_json::to_string_pretty(record)?;
        StagedWrite::stage(&self.path, json.as_bytes())
    }

    /// Rename staged files into place, in order, under the exclusive lock.
    ///
    /// If a rename fails, files already renamed by this call get their
    /// previous contents back and the remaining temp files are removed.
    pub fn commit(&self, writes: Vec<StagedWrite>) -> Result<()> {
        let _lock = DocumentLock::exclusive(&self.lock_path)?;

        let mut done: Vec<StagedWrite> = Vec::with_capacity(writes.len());
        for mut write in writes {
            if let Err(e) = write.rename() {
                for applied in done.iter().rev() {
                    applied.restore();
                }
                return Err(e);
            }
            done.push(write);
        }

        for write in &done {
            debug!("Committed {}", write.path.display());
        }
        Ok(())
    }
}

/// A document written to `<path>.tmp` and fsynced, not yet renamed.
///
/// Dropping an uncommitted write removes its temp file.
#[derive(Debug)]
pub struct StagedWrite {
    path: PathBuf,
    tmp_path: PathBuf,
    /// Contents of `path` before the write, `None` if it did not exist
    previous: Option<Vec<u8>>,
    renamed: bool,
}

impl StagedWrite {
    /// Write `contents` to `<path>.tmp` and fsync it.
    pub fn stage(path: &Path, contents: &[u8]) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let previous = match fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let tmp_path = sibling(path, TMP_SUFFIX);
        let mut tmp_file = File::create(&tmp_path)?;
        let staged = Self {
            path: path.to_path_buf(),
            tmp_path,
            previous,
            renamed: false,
        };
        tmp_file.write_all(contents)?;
        tmp_file.sync_all()?;
        Ok(staged)
    }

    /// Rename the temp file over a single document without locking.
    pub fn commit(mut self) -> Result<()> {
        self.rename()
    }

    fn rename(&mut self) -> Result<()> {
        fs::rename(&self.tmp_path, &self.path)?;
        self.renamed = true;
        Ok(())
    }

    /// Put back what was at `path` before this write was renamed in.
    fn restore(&self) {
        let result = match &self.previous {
            Some(bytes) => fs::write(&self.path, bytes),
            None => fs::remove_file(&self.path),
        };
        if let Err(e) = result {
            warn!("Failed to restore {}: {e}", self.path.display());
        }
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.renamed {
            let _ = fs::remove_file(&self.tmp_path);
        }
    }
}

/// Advisory lock held until dropped.
struct DocumentLock {
    file: File,
}

impl DocumentLock {
    fn exclusive(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        FileExt::lock_exclusive(&file).map_err(|e| lock_error(path, e))?;
        Ok(Self { file })
    }

    fn shared(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        FileExt::lock_shared(&file).map_err(|e| lock_error(path, e))?;
        Ok(Self { file })
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn lock_error(path: &Path, e: std::io::Error) -> TaskRewardError {
    TaskRewardError::Other(anyhow::anyhow!(
        "Failed to acquire lock {}: {e}",
        path.display()
    ))
}

/// Path with `suffix` appended to the file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::Tier;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn test_store() -> (RecordStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = RecordStore::new(temp_dir.path().join("record.json"));
        (store, temp_dir)
    }

    #[test]
    fn test_load_missing_is_missing_document() {
        let (store, _temp_dir) = test_store();
        let err = store.load().unwrap_err();
        assert!(matches!(
            err,
            TaskRewardError::MissingDocument {
                kind: DocumentKind::Record,
                ..
            }
        ));
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let (store, _temp_dir) = test_store();

        let (record, created) = store.load_or_create(5).expect("create");
        assert!(created);
        assert!(store.exists());
        assert_eq!(record.daily_reset_limit, 5);

        let (again, created) = store.load_or_create(9).expect("load");
        assert!(!created);
        assert_eq!(again.daily_reset_limit, 5);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (store, _temp_dir) = test_store();

        let mut record = Record::default();
        record.date = NaiveDate::from_ymd_opt(2024, 5, 1);
        record.daily_reset_limit = 1;
        record.scores.update(Tier::Monthly, 40);
        record.set_lists(Tier::Daily, vec!["a".into()], vec!["b".into(), "c".into()]);

        store.save(&record).expect("save");
        let loaded = store.load().expect("load");
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_atomic_write_leaves_no_tmp_file() {
        let (store, _temp_dir) = test_store();
        store.save(&Record::default()).expect("save");
        assert!(!sibling(store.path(), TMP_SUFFIX).exists());
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("deep").join("nested").join("record.json");
        let store = RecordStore::new(&path);

        store.save(&Record::default()).expect("save");
        assert!(path.exists());
    }

    #[test]
    fn test_corrupted_record_is_an_error() {
        let (store, _temp_dir) = test_store();
        fs::write(store.path(), "not valid json {{{").expect("write corrupted file");
        assert!(matches!(store.load(), Err(TaskRewardError::Json(_))));
    }

    #[test]
    fn test_save_after_external_lock_released() {
        let (store, _temp_dir) = test_store();
        store.save(&Record::default()).expect("first save");

        let lock_file = File::open(store.lock_path()).expect("open lock file");
        FileExt::lock_exclusive(&lock_file).expect("acquire lock");
        FileExt::unlock(&lock_file).expect("release lock");

        store.save(&Record::default()).expect("save after unlock");
    }

    #[test]
    fn test_load_alongside_shared_lock() {
        let (store, _temp_dir) = test_store();
        store.save(&Record::default()).expect("save");

        let lock_file = File::open(store.lock_path()).expect("open lock file");
        FileExt::lock_shared(&lock_file).expect("acquire shared lock");
        assert_eq!(store.load().expect("load"), Record::default());
        FileExt::unlock(&lock_file).expect("release lock");
    }

    #[test]
    fn test_lock_lives_in_hidden_directory() {
        let (store, temp_dir) = test_store();
        store.save(&Record::default()).expect("save");

        assert_eq!(
            store.lock_path(),
            temp_dir.path().join(".tasknreward").join("lock")
        );
        assert!(store.lock_path().exists());
        assert!(!temp_dir.path().join("record.json.lock").exists());
    }

    #[test]
    fn test_dropped_stage_removes_tmp_file() {
        let (store, _temp_dir) = test_store();
        let staged = store.stage(&Record::default()).expect("stage");
        let tmp = sibling(store.path(), TMP_SUFFIX);
        assert!(tmp.exists());

        drop(staged);
        assert!(!tmp.exists());
        assert!(!store.exists());
    }

    #[test]
    fn test_failed_stage_leaves_no_tmp_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").expect("write blocker");

        let result = StagedWrite::stage(&blocker.join("record.json"), b"{}");
        assert!(result.is_err());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_commit_restores_earlier_renames() {
        let (store, temp_dir) = test_store();
        let first = temp_dir.path().join("first.txt");
        let second = temp_dir.path().join("second.txt");
        fs::write(&first, "old").expect("write first");

        let staged_first = StagedWrite::stage(&first, b"new").expect("stage first");
        let staged_second = StagedWrite::stage(&second, b"new").expect("stage second");
        fs::create_dir(&second).expect("block second with a directory");
        fs::write(second.join("keep"), "x").expect("make directory non-empty");

        let result = store.commit(vec![staged_first, staged_second]);

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&first).unwrap(), "old");
        assert!(!sibling(&first, TMP_SUFFIX).exists());
        assert!(!sibling(&second, TMP_SUFFIX).exists());
    }

    #[test]
    fn test_sibling_paths() {
        let path = Path::new("/data/record.json");
        assert_eq!(sibling(path, ".tmp"), PathBuf::from("/data/record.json.tmp"));
        assert_eq!(sibling(path, ".bak"), PathBuf::from("/data/record.json.bak"));
    }
}
