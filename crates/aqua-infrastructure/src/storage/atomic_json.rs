//! Crash-safe persistence for small JSON state files.
//!
//! A reader must never observe a half-written file, even if the process is
//! killed mid-save. Writes go to a sibling temp file that is fsynced and
//! renamed over the target; read-modify-write cycles hold a lock file.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Failure modes of the JSON state file.
#[derive(Debug)]
pub enum AtomicJsonError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicJsonError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicJsonError::JsonError(e) => write!(f, "JSON error: {}", e),
            AtomicJsonError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicJsonError {}

impl From<std::io::Error> for AtomicJsonError {
    fn from(e: std::io::Error) -> Self {
        AtomicJsonError::IoError(e)
    }
}

impl From<serde_json::Error> for AtomicJsonError {
    fn from(e: serde_json::Error) -> Self {
        AtomicJsonError::JsonError(e)
    }
}

/// Typed handle to a JSON file that is only ever replaced whole.
///
/// The on-disk value is always a complete, parseable serialization of `T`:
/// [`save`](Self::save) writes a temp file, fsyncs it, then renames it into
/// place, and [`update`](Self::update) serializes read-modify-write cycles
/// behind an exclusive lock file.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Wraps the file at `path`. The file does not need to exist yet.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    /// Returns the underlying file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and deserializes the file.
    ///
    /// A missing or empty file is not an error; both read as `None`.
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Replaces the file's contents with `data`.
    ///
    /// The new contents become visible in a single rename, so concurrent
    /// readers see either the old value or the new one.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json_string = serde_json::to_string_pretty(data)?;

        // The temp file must live next to the target; rename is only atomic
        // within a filesystem.
        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Applies `f` to the current contents and writes the result back.
    ///
    /// `f` gets the stored value, or `default_value` when nothing is on disk
    /// yet. The whole load-mutate-save cycle runs under an exclusive lock, so
    /// two writers cannot clobber each other's changes.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<(), AtomicJsonError>
    where
        F: FnOnce(&mut T) -> Result<(), AtomicJsonError>,
    {
        let _lock = self.acquire_lock()?;

        let mut data = self.load()?.unwrap_or(default_value);

        f(&mut data)?;

        self.save(&data)?;

        Ok(())
    }

    /// Path of the sibling temp file, e.g. `.state.json.tmp` for `state.json`.
    fn get_temp_path(&self) -> Result<PathBuf, AtomicJsonError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicJsonError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicJsonError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }

    fn acquire_lock(&self) -> Result<FileLock, AtomicJsonError> {
        FileLock::acquire(&self.path)
    }
}

/// Exclusive-lock guard; releases and removes the lock file on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    /// Locks `<path>.lock`, blocking until any current holder lets go.
    fn acquire(path: &Path) -> Result<Self, AtomicJsonError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive().map_err(|e| {
                AtomicJsonError::LockError(format!("Failed to acquire lock: {}", e))
            })?;
        }

        // Advisory locking is only wired up for Unix; elsewhere the lock
        // file alone has to do, and a single-user client writes from one
        // process at a time anyway.

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Closing the handle releases the fs2 lock; the lock file itself is
        // just cleanup.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestState {
        token: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("state.json");
        let atomic_file = AtomicJsonFile::<TestState>::new(file_path);

        let state = TestState {
            token: "abc".to_string(),
            count: 42,
        };

        atomic_file.save(&state).unwrap();

        let loaded = atomic_file.load().unwrap().unwrap();
        assert_eq!(loaded.token, "abc");
        assert_eq!(loaded.count, 42);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("missing.json");
        let atomic_file = AtomicJsonFile::<TestState>::new(file_path);

        let result = atomic_file.load().unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("state.json");
        let atomic_file = AtomicJsonFile::<BTreeMap<String, String>>::new(file_path);

        atomic_file
            .update(BTreeMap::new(), |map| {
                map.insert("authToken".to_string(), "abc".to_string());
                Ok(())
            })
            .unwrap();

        atomic_file
            .update(BTreeMap::new(), |map| {
                map.insert("activeTankId".to_string(), "42".to_string());
                Ok(())
            })
            .unwrap();

        let loaded = atomic_file.load().unwrap().unwrap();
        assert_eq!(loaded.get("authToken"), Some(&"abc".to_string()));
        assert_eq!(loaded.get("activeTankId"), Some(&"42".to_string()));
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("state.json");
        let atomic_file = AtomicJsonFile::<TestState>::new(file_path.clone());

        let state = TestState {
            token: "abc".to_string(),
            count: 1,
        };
        atomic_file.save(&state).unwrap();

        let tmp_path = temp_dir.path().join(".state.json.tmp");
        assert!(!tmp_path.exists());
        assert!(file_path.exists());
    }
}
