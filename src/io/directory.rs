use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::engine::CandidateSource;
use crate::model::candidate::{Candidate, User};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("could not read user directory {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid user directory {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read-through cache of the user directory file.
///
/// The file is fetched once per mount (`ensure_loaded`); the ranked corpus is
/// a projection kept next to the records so reads never allocate.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    path: PathBuf,
    users: IndexMap<String, User>,
    candidates: Vec<Candidate>,
    loaded_at: Option<DateTime<Utc>>,
}

impl UserDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        UserDirectory {
            path: path.into(),
            users: IndexMap::new(),
            candidates: Vec::new(),
            loaded_at: None,
        }
    }

    /// A directory that is already populated and never touches disk.
    pub fn from_users(users: Vec<User>) -> Self {
        let mut dir = UserDirectory::new(PathBuf::new());
        dir.replace(users);
        dir.loaded_at = Some(Utc::now());
        dir
    }

    /// Open and fetch in one step.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DirectoryError> {
        let mut dir = UserDirectory::new(path);
        dir.ensure_loaded()?;
        Ok(dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fetch from disk unless this mount already did.
    pub fn ensure_loaded(&mut self) -> Result<(), DirectoryError> {
        if self.loaded_at.is_some() {
            return Ok(());
        }
        self.refresh()
    }

    /// Fetch from disk unconditionally. On failure the previous snapshot is kept.
    pub fn refresh(&mut self) -> Result<(), DirectoryError> {
        let users = read_users(&self.path)?;
        log::debug!(
            target: "mention.directory",
            "loaded {} users from {}",
            users.len(),
            self.path.display()
        );
        self.replace(users);
        self.loaded_at = Some(Utc::now());
        Ok(())
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Snapshot of the corpus in directory order.
    pub fn snapshot(&self) -> &[Candidate] {
        &self.candidates
    }

    fn replace(&mut self, users: Vec<User>) {
        self.users.clear();
        for user in users {
            // A repeated username keeps its first position, last record wins
            self.users.insert(user.username.clone(), user);
        }
        self.candidates = self.users.values().map(Candidate::from).collect();
    }
}

impl CandidateSource for UserDirectory {
    fn candidates(&self) -> &[Candidate] {
        self.snapshot()
    }
}

/// Parse a JSON array of users.
pub fn read_users(path: &Path) -> Result<Vec<User>, DirectoryError> {
    let text = fs::read_to_string(path).map_err(|e| DirectoryError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| DirectoryError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
