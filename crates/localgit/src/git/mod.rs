//! Git operations on local repositories.
//!
//! [`GitOperations`] is the capability the tool layer depends on. Every
//! method receives a repository path that has already been validated and
//! returns the text to show the caller, or a [`GitError`] carrying the
//! command's output. [`GitCli`] implements it by running the `git`
//! executable.

mod cli;

use std::io;
use std::path::Path;

use thiserror::Error;

pub use cli::GitCli;

/// Errors that can occur while running git.
#[derive(Debug, Error)]
pub enum GitError {
    /// git ran and exited unsuccessfully.
    #[error("git command failed: {command} ({status})\nOutput: {output}")]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// How the process exited.
        status: String,
        /// Combined stdout and stderr.
        output: String,
    },

    /// The git executable could not be started.
    #[error("failed to run {binary}: {source}")]
    Spawn {
        /// The executable that was invoked.
        binary: String,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// Writing the patch to git's stdin failed.
    #[error("failed to send input to git: {0}")]
    Input(#[source] io::Error),

    /// The target directory for `init` could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that couldn't be created.
        path: String,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// An argument would be parsed by git as an option.
    #[error("{name} must not start with '-': {value}")]
    OptionLikeArgument {
        /// Name of the argument.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Result type for git operations.
pub type Result<T> = std::result::Result<T, GitError>;

/// Operations on a local git repository.
pub trait GitOperations: Send + Sync {
    /// Working tree status.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn status(&self, repo: &Path) -> Result<String>;

    /// Changes not yet staged.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn diff_unstaged(&self, repo: &Path) -> Result<String>;

    /// Changes staged for commit.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn diff_staged(&self, repo: &Path) -> Result<String>;

    /// Differences between the working tree and a branch or commit.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn diff(&self, repo: &Path, target: &str) -> Result<String>;

    /// Commit the staged changes.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn commit(&self, repo: &Path, message: &str) -> Result<String>;

    /// Stage the given files.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn add(&self, repo: &Path, files: &[String]) -> Result<String>;

    /// Unstage everything.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn reset_staged(&self, repo: &Path) -> Result<String>;

    /// The most recent commits, newest first, one formatted entry each.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn log(&self, repo: &Path, max_count: usize) -> Result<Vec<String>>;

    /// Create a branch, optionally from `base`, and check it out.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn create_branch(&self, repo: &Path, name: &str, base: Option<&str>) -> Result<String>;

    /// Switch branches.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn checkout(&self, repo: &Path, name: &str) -> Result<String>;

    /// Initialize a repository at `path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if the directory can't be created or git fails.
    fn init(&self, path: &Path) -> Result<String>;

    /// Show a revision.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn show(&self, repo: &Path, revision: &str) -> Result<String>;

    /// Push a branch and set its upstream.
    ///
    /// Defaults to `origin` and the current branch.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn push(&self, repo: &Path, remote: Option<&str>, branch: Option<&str>) -> Result<String>;

    /// Pull with rebase and prune.
    ///
    /// Defaults to `origin` and the upstream of the current branch.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn pull(&self, repo: &Path, remote: Option<&str>, branch: Option<&str>) -> Result<String>;

    /// Apply a patch given as text.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn apply_patch(&self, repo: &Path, patch: &str) -> Result<String>;

    /// Apply a patch stored in a file.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if git fails.
    fn apply_patch_file(&self, repo: &Path, patch_file: &Path) -> Result<String>;
}
