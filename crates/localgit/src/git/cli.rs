//! [`GitOperations`] backed by the `git` executable.

use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use super::{GitError, GitOperations, Result};

const DEFAULT_REMOTE: &str = "origin";

/// Field and record separators for `git log` output.
const FIELD_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';
const LOG_FORMAT: &str = "--format=%H%x1f%an%x1f%ae%x1f%ad%x1f%s%x1e";

/// Runs git as a child process.
///
/// Arguments are passed as an argv vector, never through a shell.
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: PathBuf,
}

impl GitCli {
    /// Use `git` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_binary("git")
    }

    /// Use a specific git executable.
    #[must_use]
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The git executable in use.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn run<S: AsRef<OsStr>>(&self, repo: &Path, args: &[S]) -> Result<String> {
        self.run_with_input(repo, args, None)
    }

    /// Run git in `repo` and return combined stdout and stderr.
    fn run_with_input<S: AsRef<OsStr>>(
        &self,
        repo: &Path,
        args: &[S],
        input: Option<&str>,
    ) -> Result<String> {
        let command = describe(&self.binary, args);
        trace!(repo = %repo.display(), command = %command, "Running git");

        let mut child = Command::new(&self.binary)
            .args(args)
            .current_dir(repo)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GitError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        // Dropping stdin closes the pipe so git sees end of input. A failed
        // write is only reported once the exit status is known.
        let written = match (input, child.stdin.take()) {
            (Some(input), Some(mut stdin)) => stdin.write_all(input.as_bytes()),
            _ => Ok(()),
        };

        let output = child.wait_with_output().map_err(|source| GitError::Spawn {
            binary: self.binary.display().to_string(),
            source,
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            debug!(command = %command, status = %output.status, "git command failed");
            return Err(GitError::CommandFailed {
                command,
                status: output.status.to_string(),
                output: combined,
            });
        }
        written.map_err(GitError::Input)?;

        Ok(combined)
    }

    fn current_branch(&self, repo: &Path) -> Result<String> {
        let branch = self.run(repo, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(branch.trim().to_string())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitOperations for GitCli {
    fn status(&self, repo: &Path) -> Result<String> {
        self.run(repo, &["status"])
    }

    fn diff_unstaged(&self, repo: &Path) -> Result<String> {
        self.run(repo, &["diff"])
    }

    fn diff_staged(&self, repo: &Path) -> Result<String> {
        self.run(repo, &["diff", "--cached"])
    }

    fn diff(&self, repo: &Path, target: &str) -> Result<String> {
        reject_option_like("target", target)?;
        self.run(repo, &["diff", target])
    }

    fn commit(&self, repo: &Path, message: &str) -> Result<String> {
        self.run(repo, &["commit", "-m", message])?;
        let hash = self.run(repo, &["rev-parse", "HEAD"])?;
        Ok(format!(
            "Changes committed successfully with hash {}",
            hash.trim()
        ))
    }

    fn add(&self, repo: &Path, files: &[String]) -> Result<String> {
        let mut args = vec!["add", "--"];
        args.extend(files.iter().map(String::as_str));
        self.run(repo, &args)?;
        Ok("Files staged successfully".to_string())
    }

    fn reset_staged(&self, repo: &Path) -> Result<String> {
        self.run(repo, &["reset"])?;
        Ok("All staged changes reset".to_string())
    }

    fn log(&self, repo: &Path, max_count: usize) -> Result<Vec<String>> {
        let count = max_count.to_string();
        let output = self.run(repo, &["log", "-n", count.as_str(), LOG_FORMAT])?;

        Ok(output
            .split(RECORD_SEP)
            .map(str::trim)
            .filter(|record| !record.is_empty())
            .map(format_log_record)
            .collect())
    }

    fn create_branch(&self, repo: &Path, name: &str, base: Option<&str>) -> Result<String> {
        reject_option_like("branch_name", name)?;
        let mut args = vec!["checkout", "-b", name];
        if let Some(base) = base {
            reject_option_like("base_branch", base)?;
            args.push(base);
        }
        self.run(repo, &args)?;

        Ok(match base {
            Some(base) => format!("Created branch '{name}' from '{base}' and checked it out"),
            None => format!("Created branch '{name}' and checked it out"),
        })
    }

    fn checkout(&self, repo: &Path, name: &str) -> Result<String> {
        reject_option_like("branch_name", name)?;
        self.run(repo, &["checkout", name])?;
        Ok(format!("Switched to branch '{name}'"))
    }

    fn init(&self, path: &Path) -> Result<String> {
        fs::create_dir_all(path).map_err(|source| GitError::CreateDir {
            path: path.display().to_string(),
            source,
        })?;
        let output = self.run(path, &["init"])?;
        Ok(output.trim().to_string())
    }

    fn show(&self, repo: &Path, revision: &str) -> Result<String> {
        reject_option_like("revision", revision)?;
        self.run(repo, &["show", revision])
    }

    fn push(&self, repo: &Path, remote: Option<&str>, branch: Option<&str>) -> Result<String> {
        let remote = remote.unwrap_or(DEFAULT_REMOTE);
        reject_option_like("remote", remote)?;
        let branch = match branch {
            Some(branch) => branch.to_string(),
            None => self.current_branch(repo)?,
        };
        reject_option_like("branch", &branch)?;

        let output = self.run(repo, &["push", "-u", remote, branch.as_str()])?;
        Ok(format!(
            "Pushed branch '{branch}' to '{remote}'\n{}",
            output.trim()
        ))
    }

    fn pull(&self, repo: &Path, remote: Option<&str>, branch: Option<&str>) -> Result<String> {
        let remote = remote.unwrap_or(DEFAULT_REMOTE);
        reject_option_like("remote", remote)?;
        let mut args = vec!["pull", "--rebase", "--prune", remote];
        if let Some(branch) = branch {
            reject_option_like("branch", branch)?;
            args.push(branch);
        }
        self.run(repo, &args)
    }

    fn apply_patch(&self, repo: &Path, patch: &str) -> Result<String> {
        self.run_with_input(repo, &["apply", "-"], Some(patch))?;
        Ok("Patch applied successfully".to_string())
    }

    fn apply_patch_file(&self, repo: &Path, patch_file: &Path) -> Result<String> {
        self.run(repo, &[OsStr::new("apply"), patch_file.as_os_str()])?;
        Ok(format!(
            "Patch {} applied successfully",
            patch_file.display()
        ))
    }
}

fn describe<S: AsRef<OsStr>>(binary: &Path, args: &[S]) -> String {
    let mut command = binary.display().to_string();
    for arg in args {
        command.push(' ');
        command.push_str(&arg.as_ref().to_string_lossy());
    }
    command
}

fn reject_option_like(name: &'static str, value: &str) -> Result<()> {
    if value.starts_with('-') {
        return Err(GitError::OptionLikeArgument {
            name,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn format_log_record(record: &str) -> String {
    let mut fields = record.split(FIELD_SEP);
    let hash = fields.next().unwrap_or_default();
    let name = fields.next().unwrap_or_default();
    let email = fields.next().unwrap_or_default();
    let date = fields.next().unwrap_or_default();
    let subject = fields.next().unwrap_or_default();
    format!("Commit: {hash}\nAuthor: {name} <{email}>\nDate: {date}\nMessage: {subject}\n")
}
