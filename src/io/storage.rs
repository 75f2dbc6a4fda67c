use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// A flat key-value storage area. Keys are plain names, values are strings.
///
/// The store talks to storage only through this trait, so tests can run
/// against [`MemStorage`] instead of a real directory.
pub trait Storage {
    /// Read a key. A missing key is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    /// Write a key, replacing any existing value.
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    /// Remove a key. Removing a missing key is fine.
    fn remove(&mut self, key: &str) -> io::Result<()>;
    /// The directory backing this area, if any. This is where the watcher
    /// subscribes and where the write journal lives.
    fn dir(&self) -> Option<&Path>;
}

/// Default storage directory when no override is given.
pub fn default_data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(base) => base.join("taskify"),
        None => PathBuf::from(".taskify"),
    }
}

/// Replace `path` in one step: write a temp file beside it, then rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Directory-backed storage
// ---------------------------------------------------------------------------

/// Key-value storage with one file per key inside a data directory.
///
/// Writes go through [`atomic_write`], so another process watching the
/// directory never reads a half-written value.
pub struct DirStorage {
    dir: PathBuf,
}

impl DirStorage {
    /// Open the storage directory, creating it if needed.
    pub fn open(dir: &Path) -> io::Result<DirStorage> {
        fs::create_dir_all(dir)?;
        Ok(DirStorage {
            dir: dir.to_path_buf(),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for DirStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        atomic_write(&self.key_path(key), value.as_bytes())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn dir(&self) -> Option<&Path> {
        Some(&self.dir)
    }
}

// ---------------------------------------------------------------------------
// In-memory storage
// ---------------------------------------------------------------------------

/// In-memory storage area. Nothing to watch, nothing on disk.
#[derive(Debug, Clone, Default)]
pub struct MemStorage {
    entries: HashMap<String, String>,
}

impl MemStorage {
    pub fn new() -> MemStorage {
        MemStorage::default()
    }
}

impl Storage for MemStorage {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn dir(&self) -> Option<&Path> {
        None
    }
}
