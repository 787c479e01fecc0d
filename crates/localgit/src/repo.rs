//! Repository path validation.
//!
//! Every tool call names its repository with an untrusted `repo_path`
//! string. [`PathValidator`] turns that string into a [`RepoPath`]: an
//! absolute path under one of the configured roots that contains a `.git`
//! entry. Validation is repeated on every call; results are never cached
//! because both the configuration and the filesystem may change in between.

use std::env;
use std::fmt;
use std::fs;
use std::ops::Deref;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Reasons a repository path is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// No path was given and no default repository is configured.
    #[error("no repository specified and no defaults configured")]
    NoRepository,

    /// The path could not be resolved to an absolute path.
    #[error("invalid path: {reason}")]
    InvalidPath {
        /// The path as requested.
        path: String,
        /// Why resolution failed.
        reason: String,
    },

    /// The path is outside every allowed root.
    #[error("access denied - path outside allowed repositories: {}", .path.display())]
    AccessDenied {
        /// The resolved path.
        path: PathBuf,
    },

    /// The path has no `.git` entry.
    #[error("not a git repository: {}", .path.display())]
    NotARepository {
        /// The resolved path.
        path: PathBuf,
    },
}

/// How a resolved path is matched against the allowed roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Containment {
    /// The root, as configured, is a string prefix of the path.
    ///
    /// A root of `/repos/app` also admits `/repos/app-backup`.
    #[default]
    Prefix,
    /// The root is the path itself or one of its ancestor directories.
    Component,
}

impl fmt::Display for Containment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix => write!(f, "prefix"),
            Self::Component => write!(f, "component"),
        }
    }
}

/// A validated repository working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath(PathBuf);

impl RepoPath {
    /// Borrow the path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Take the path.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl Deref for RepoPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RepoPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Decides which paths repository operations may touch.
///
/// With no allowed roots configured any git working tree is accepted.
#[derive(Debug, Clone, Default)]
pub struct PathValidator {
    allowed: Vec<PathBuf>,
    containment: Containment,
}

impl PathValidator {
    /// Create a validator for the given roots, using prefix containment.
    #[must_use]
    pub fn new(allowed: Vec<PathBuf>) -> Self {
        Self {
            allowed,
            containment: Containment::Prefix,
        }
    }

    /// Set the containment mode.
    #[must_use]
    pub fn with_containment(mut self, containment: Containment) -> Self {
        self.containment = containment;
        self
    }

    /// The configured roots, in order.
    #[must_use]
    pub fn allowed_roots(&self) -> &[PathBuf] {
        &self.allowed
    }

    /// The containment mode.
    #[must_use]
    pub fn containment(&self) -> Containment {
        self.containment
    }

    /// The repository used when a call does not name one.
    #[must_use]
    pub fn default_root(&self) -> Option<&Path> {
        self.allowed.first().map(PathBuf::as_path)
    }

    /// Validate a requested repository path.
    ///
    /// An empty request selects the first allowed root. Whatever the source,
    /// the result must contain a `.git` entry.
    ///
    /// # Errors
    ///
    /// Returns the matching [`PathError`] when no repository is available,
    /// the path cannot be resolved, it lies outside the allowed roots, or it
    /// is not a git working tree.
    pub fn validate(&self, requested: &str) -> Result<RepoPath, PathError> {
        let path = if requested.is_empty() {
            let default = self.default_root().ok_or(PathError::NoRepository)?;
            debug!(repo = %default.display(), "No repository requested, using default");
            resolve(default)?
        } else {
            self.resolve_within(requested)?
        };

        ensure_working_tree(path)
    }

    /// Resolve a requested path and check it against the allowed roots.
    ///
    /// Unlike [`validate`](Self::validate) this does not require a `.git`
    /// entry, so it suits targets that are about to be initialized.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidPath`] or [`PathError::AccessDenied`].
    pub fn resolve_within(&self, requested: &str) -> Result<PathBuf, PathError> {
        if requested.contains('\0') {
            return Err(PathError::InvalidPath {
                path: requested.to_string(),
                reason: "path contains a NUL byte".to_string(),
            });
        }
        let path = resolve(Path::new(requested))?;

        if self.allowed.is_empty() {
            trace!(path = %path.display(), "No allowed roots configured, skipping containment");
            return Ok(path);
        }

        if self.allowed.iter().any(|root| self.contains(root, &path)) {
            Ok(path)
        } else {
            debug!(path = %path.display(), "Path outside allowed repositories");
            Err(PathError::AccessDenied { path })
        }
    }

    fn contains(&self, root: &Path, path: &Path) -> bool {
        match self.containment {
            Containment::Prefix => path
                .as_os_str()
                .as_encoded_bytes()
                .starts_with(root.as_os_str().as_encoded_bytes()),
            Containment::Component => path.starts_with(normalize_lexically(root)),
        }
    }
}

/// Validate `requested` against `allowed` with prefix containment.
///
/// # Errors
///
/// See [`PathValidator::validate`].
pub fn validate_repo_path(requested: &str, allowed: &[PathBuf]) -> Result<RepoPath, PathError> {
    PathValidator::new(allowed.to_vec()).validate(requested)
}

/// Make `path` absolute against the working directory and normalize it.
fn resolve(path: &Path) -> Result<PathBuf, PathError> {
    if path.is_absolute() {
        return Ok(normalize_lexically(path));
    }

    let cwd = env::current_dir().map_err(|e| PathError::InvalidPath {
        path: path.display().to_string(),
        reason: format!("cannot resolve against the working directory: {e}"),
    })?;
    Ok(normalize_lexically(&cwd.join(path)))
}

/// Drop `.` segments and apply `..` without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn ensure_working_tree(path: PathBuf) -> Result<RepoPath, PathError> {
    // Any stat failure, not only NotFound, counts as missing.
    if fs::metadata(path.join(".git")).is_ok() {
        Ok(RepoPath(path))
    } else {
        Err(PathError::NotARepository { path })
    }
}
