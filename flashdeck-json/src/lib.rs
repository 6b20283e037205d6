use flashdeck_core::{CoreError, KeyValueStore};
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub mod paths;

pub const DEFAULT_MAX_BACKUPS: usize = 10;

/// One `<key>.json` file per slot under a data directory. Writes go through a
/// temp file and a rename; every write also drops a timestamped copy into
/// the backups directory, of which the newest `max_backups` per key are kept.
pub struct FileKv {
    root: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
    write_lock: Mutex<()>,
}

impl FileKv {
    pub fn open_with(root: PathBuf, max_backups: usize) -> Result<Self, CoreError> {
        let backups_dir = paths::backups_dir(&root);
        ensure_dir(&root)?;
        ensure_dir(&backups_dir)?;
        debug!(root = %root.display(), "file store opened");
        Ok(Self {
            root,
            backups_dir,
            max_backups: max_backups.max(1),
            write_lock: Mutex::new(()),
        })
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, CoreError> {
        check_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

fn check_key(key: &str) -> Result<(), CoreError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(CoreError::Invalid("key must be [A-Za-z0-9_-]+"))
    }
}

fn ensure_dir(path: &Path) -> Result<(), CoreError> {
    fs::create_dir_all(path).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, e: io::Error) -> CoreError {
    CoreError::storage(format!("{}: {e}", path.display()))
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<(), io::Error> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

const BACKUP_STAMP: &str = "%Y%m%d-%H%M%S%3f";

fn write_backup(backups_dir: &Path, key: &str, keep: usize, data: &[u8]) -> Result<(), io::Error> {
    let ts = chrono::Local::now().format(BACKUP_STAMP);
    let backup_path = backups_dir.join(format!("{key}-{ts}.json"));
    write_atomic(&backup_path, data)?;
    rotate_backups(backups_dir, key, keep)
}

/// True for `<key>-<stamp>.json` only. Keys may contain `-`, so `deck`
/// must not claim the backups of `deck-spanish`.
fn is_backup_of(name: &str, key: &str) -> bool {
    let Some(stamp) = name
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|rest| rest.strip_suffix(".json"))
    else {
        return false;
    };
    chrono::NaiveDateTime::parse_from_str(stamp, BACKUP_STAMP).is_ok()
}

fn rotate_backups(dir: &Path, key: &str, keep: usize) -> Result<(), io::Error> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| is_backup_of(&e.file_name().to_string_lossy(), key))
        .collect();
    // Names embed the timestamp, so lexical order is age order.
    entries.sort_by_key(|e| e.file_name());
    if entries.len() > keep {
        for e in &entries[0..entries.len() - keep] {
            let _ = fs::remove_file(e.path());
        }
    }
    Ok(())
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.slot_path(key)?;
        let _guard = self.write_lock.lock();
        write_atomic(&path, value.as_bytes()).map_err(|e| io_error(&path, e))?;
        // Scratch keys such as the availability probe are not worth a backup.
        if !key.starts_with("__") {
            if let Err(e) = write_backup(&self.backups_dir, key, self.max_backups, value.as_bytes()) {
                warn!(key, error = %e, "backup failed");
            }
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let path = self.slot_path(key)?;
        let _guard = self.write_lock.lock();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
