//! `localgit` - Local git tools for AI agents
//!
//! This library provides git operations on local repositories for agent tool
//! frameworks: a path validator that confines every call to configured
//! repository roots, and a body filter that strips attribution trailers and
//! generated footers from commit messages and PR descriptions.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod git;
pub mod logging;
pub mod repo;
pub mod serve;
pub mod tools;
pub mod translations;

pub use config::Config;
pub use error::{Error, Result};
pub use filter::BodyFilter;
pub use git::{GitCli, GitError, GitOperations};
pub use logging::init_logging;
pub use repo::{validate_repo_path, PathError, PathValidator, RepoPath};
pub use tools::{GitTools, ToolResult};
pub use translations::Translations;
