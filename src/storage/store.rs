#![forbid(unsafe_code)]

//! JSON file store for the colleague list
//!
//! The whole list lives in `<home>/.teamtime/colleagues.json` as a JSON array
//! of `{name, city, timezone}` objects. Every mutation rewrites the file in
//! full. The file is treated as untrusted input on load: it is size-checked
//! before being read and every record is rebuilt through [`Colleague::new`]
//! after parsing, so hand-edited values are trimmed and re-validated.

use crate::types::{Colleague, ColleagueError, ColleagueList};
use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Name of the application folder inside the home directory
pub const APP_DIR: &str = ".teamtime";

/// Name of the colleague file inside [`APP_DIR`]
pub const FILE_NAME: &str = "colleagues.json";

/// Files larger than this are rejected without being parsed (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Errors raised while locating, reading or writing the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("home directory must not be empty")]
    MissingHomeDir,

    #[error("home directory must be an absolute path: {}", .0.display())]
    RelativeHomeDir(PathBuf),

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is too large: {size} bytes (max {max})", path.display())]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("failed to parse JSON in {}: {source}", path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize colleagues: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A persisted record failed validation; `position` is 1-based
    #[error("{}: colleague at index {position}: {source}", path.display())]
    InvalidRecord {
        path: PathBuf,
        position: usize,
        #[source]
        source: ColleagueError,
    },
}

/// Failure of a [`Store::transaction`]
///
/// `NotSaved` carries the outcome of the mutation so the caller can report
/// exactly what failed to become durable.
#[derive(Debug, Error)]
pub enum TransactionError<T, E> {
    /// The list could not be loaded; nothing was attempted
    #[error("failed to load colleagues: {0}")]
    Load(#[source] StoreError),

    /// The mutation refused to run; nothing was written
    #[error("{0}")]
    Rejected(#[source] E),

    /// The mutation succeeded in memory but the write failed
    #[error("changes were not saved: {source}")]
    NotSaved {
        outcome: T,
        #[source]
        source: StoreError,
    },
}

/// On-disk shape of one record; missing keys read as empty and fail validation
#[derive(Deserialize)]
struct StoredColleague {
    #[serde(default)]
    name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    timezone: String,
}

/// Persistence manager for one colleague list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    home_dir: PathBuf,
    file_path: PathBuf,
}

impl Store {
    /// Creates a store rooted at the given home directory
    ///
    /// The file path is always `<home_dir>/.teamtime/colleagues.json`.
    ///
    /// # Errors
    ///
    /// Fails if `home_dir` is empty or not absolute.
    pub fn new(home_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let home_dir = home_dir.as_ref();
        if home_dir.as_os_str().is_empty() {
            return Err(StoreError::MissingHomeDir);
        }
        if !home_dir.is_absolute() {
            return Err(StoreError::RelativeHomeDir(home_dir.to_path_buf()));
        }

        Ok(Store {
            home_dir: home_dir.to_path_buf(),
            file_path: home_dir.join(APP_DIR).join(FILE_NAME),
        })
    }

    /// Absolute path of the colleague file
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// The folder holding the colleague file
    pub fn folder(&self) -> PathBuf {
        self.home_dir.join(APP_DIR)
    }

    /// The file path with the home directory abbreviated to `~`
    pub fn display_path(&self) -> PathBuf {
        match self.file_path.strip_prefix(&self.home_dir) {
            Ok(rel) => Path::new("~").join(rel),
            Err(_) => self.file_path.clone(),
        }
    }

    /// Creates the application folder if it does not exist yet
    pub fn ensure_folder(&self) -> Result<(), StoreError> {
        let folder = self.folder();
        if folder.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }

        builder
            .create(&folder)
            .map_err(|source| StoreError::CreateDir {
                path: folder.clone(),
                source,
            })?;
        info!(path = %folder.display(), "created application folder");
        Ok(())
    }

    /// Whether the colleague file exists on disk
    pub fn exists(&self) -> bool {
        self.file_path.exists()
    }

    /// Reads and validates the colleague list
    ///
    /// A missing or zero-length file is an empty list. Oversized files are
    /// rejected before any content is read.
    pub fn load(&self) -> Result<ColleagueList, StoreError> {
        let path = &self.file_path;

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no colleague file, starting empty");
                return Ok(ColleagueList::new());
            }
            Err(source) => return Err(self.read_error(source)),
        };

        let size = file.metadata().map_err(|e| self.read_error(e))?.len();
        if size > MAX_FILE_SIZE {
            return Err(self.too_large(size));
        }

        let mut content = Vec::with_capacity(size as usize);
        file.take(MAX_FILE_SIZE + 1)
            .read_to_end(&mut content)
            .map_err(|e| self.read_error(e))?;
        // The file may have grown between the size check and the read
        if content.len() as u64 > MAX_FILE_SIZE {
            return Err(self.too_large(content.len() as u64));
        }

        if content.is_empty() {
            debug!(path = %path.display(), "colleague file is empty");
            return Ok(ColleagueList::new());
        }

        let records: Vec<StoredColleague> =
            serde_json::from_slice(&content).map_err(|source| StoreError::MalformedJson {
                path: path.clone(),
                source,
            })?;

        let mut list = ColleagueList::new();
        for (index, record) in records.iter().enumerate() {
            let colleague = Colleague::new(&record.name, &record.city, &record.timezone)
                .map_err(|source| StoreError::InvalidRecord {
                    path: path.clone(),
                    position: index + 1,
                    source,
                })?;
            list.add(colleague);
        }

        debug!(path = %path.display(), count = list.len(), "loaded colleagues");
        Ok(list)
    }

    /// Replaces the file content with the given list
    ///
    /// The JSON is written to a sibling temporary file which is then renamed
    /// over the target, so a failed write never leaves a half-written file.
    pub fn save(&self, list: &ColleagueList) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(list).map_err(StoreError::Serialize)?;
        let tmp_path = self.file_path.with_extension("json.tmp");

        write_private(&tmp_path, json.as_bytes()).map_err(|source| StoreError::Write {
            path: tmp_path.clone(),
            source,
        })?;

        if let Err(source) = fs::rename(&tmp_path, &self.file_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Write {
                path: self.file_path.clone(),
                source,
            });
        }

        debug!(path = %self.file_path.display(), count = list.len(), "saved colleagues");
        Ok(())
    }

    /// Runs one load, mutate, save cycle
    ///
    /// If `mutate` fails nothing is written. If the final save fails the
    /// mutation's outcome is returned inside [`TransactionError::NotSaved`]
    /// and the in-memory change is dropped.
    pub fn transaction<T, E, F>(&self, mutate: F) -> Result<T, TransactionError<T, E>>
    where
        F: FnOnce(&mut ColleagueList) -> Result<T, E>,
    {
        let mut list = self.load().map_err(TransactionError::Load)?;
        let outcome = mutate(&mut list).map_err(TransactionError::Rejected)?;

        match self.save(&list) {
            Ok(()) => Ok(outcome),
            Err(source) => Err(TransactionError::NotSaved { outcome, source }),
        }
    }

    fn read_error(&self, source: io::Error) -> StoreError {
        StoreError::Read {
            path: self.file_path.clone(),
            source,
        }
    }

    fn too_large(&self, size: u64) -> StoreError {
        StoreError::FileTooLarge {
            path: self.file_path.clone(),
            size,
            max: MAX_FILE_SIZE,
        }
    }
}

/// Writes `data` to `path`, readable only by the owner on Unix
fn write_private(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}
