//! The local git tools.
//!
//! [`GitTools`] is what an agent framework talks to: it lists the tool
//! catalogue and dispatches calls by name. Every call validates its
//! `repo_path` before touching git, and commit messages pass through the
//! body filter. Failures come back as [`ToolResult`] values with
//! `is_error` set, never as panics.

mod catalogue;

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::filter::BodyFilter;
use crate::git::{GitCli, GitOperations};
use crate::repo::{PathValidator, RepoPath};
use crate::translations::Translations;

pub use catalogue::{tool_names, ParamKind, ToolDefinition, ToolParam};

/// Default number of log entries when `max_count` is absent.
pub const DEFAULT_LOG_COUNT: usize = 10;

/// Outcome of a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Text shown to the caller.
    pub text: String,
    /// Whether the call failed.
    pub is_error: bool,
}

impl ToolResult {
    /// A successful result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// A failed result.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

impl From<Result<String>> for ToolResult {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(text) => Self::text(text),
            Err(err) => Self::error(err.to_string()),
        }
    }
}

/// Tool dispatcher over a [`GitOperations`] implementation.
#[derive(Debug)]
pub struct GitTools<G = GitCli> {
    git: G,
    validator: PathValidator,
    filter: Arc<BodyFilter>,
    translations: Arc<Translations>,
    default_log_count: usize,
}

impl<G: GitOperations> GitTools<G> {
    /// Create a dispatcher.
    #[must_use]
    pub fn new(git: G, validator: PathValidator, filter: Arc<BodyFilter>) -> Self {
        Self {
            git,
            validator,
            filter,
            translations: Arc::new(Translations::default()),
            default_log_count: DEFAULT_LOG_COUNT,
        }
    }

    /// Use the given translations for descriptions and titles.
    #[must_use]
    pub fn with_translations(mut self, translations: Arc<Translations>) -> Self {
        self.translations = translations;
        self
    }

    /// Change the number of log entries shown when `max_count` is absent.
    #[must_use]
    pub fn with_default_log_count(mut self, count: usize) -> Self {
        self.default_log_count = count.max(1);
        self
    }

    /// The git backend.
    #[must_use]
    pub fn git(&self) -> &G {
        &self.git
    }

    /// The tool catalogue with translated descriptions.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        catalogue::TOOLS
            .iter()
            .map(|spec| spec.definition(&self.translations))
            .collect()
    }

    /// Call a tool with JSON arguments.
    ///
    /// `Null` arguments are treated as an empty object.
    pub fn call(&self, name: &str, arguments: &Value) -> ToolResult {
        debug!(tool = name, "Calling tool");
        let outcome =
            parse_arguments(arguments).and_then(|args| self.dispatch(name, &Arguments(&args)));
        if let Err(err) = &outcome {
            debug!(
                tool = name,
                path_error = err.is_path_error(),
                git_error = err.is_git_error(),
                error = %err,
                "Tool call failed"
            );
        }
        ToolResult::from(outcome)
    }

    /// Call a tool with arguments given as a JSON string.
    pub fn call_json(&self, name: &str, arguments: &str) -> ToolResult {
        match serde_json::from_str::<Value>(arguments) {
            Ok(value) => self.call(name, &value),
            Err(err) => ToolResult::error(Error::Arguments(err.to_string()).to_string()),
        }
    }

    fn dispatch(&self, name: &str, args: &Arguments<'_>) -> Result<String> {
        match name {
            "git_status" => {
                let repo = self.repo(args)?;
                let status = self.git.status(&repo).map_err(|e| Error::git("get status", e))?;
                Ok(format!("Repository status for {repo}:\n{status}"))
            }
            "git_diff_unstaged" => {
                let repo = self.repo(args)?;
                let diff = self
                    .git
                    .diff_unstaged(&repo)
                    .map_err(|e| Error::git("get unstaged diff", e))?;
                Ok(format!("Unstaged changes for {repo}:\n{diff}"))
            }
            "git_diff_staged" => {
                let repo = self.repo(args)?;
                let diff = self
                    .git
                    .diff_staged(&repo)
                    .map_err(|e| Error::git("get staged diff", e))?;
                Ok(format!("Staged changes for {repo}:\n{diff}"))
            }
            "git_diff" => {
                let repo = self.repo(args)?;
                let target = args.required_str("target")?;
                let diff = self
                    .git
                    .diff(&repo, target)
                    .map_err(|e| Error::git("get diff", e))?;
                Ok(format!("Diff with {target} for {repo}:\n{diff}"))
            }
            "git_commit" => {
                let repo = self.repo(args)?;
                let message = self.filter.filter_body(args.required_str("message")?);
                if message.is_empty() {
                    return Err(Error::invalid_argument("message", "is empty after filtering"));
                }
                self.git
                    .commit(&repo, &message)
                    .map_err(|e| Error::git("commit", e))
            }
            "git_add" => {
                let repo = self.repo(args)?;
                let files = split_files(args.required_str("files")?);
                if files.is_empty() {
                    return Err(Error::invalid_argument("files", "must name at least one path"));
                }
                self.git
                    .add(&repo, &files)
                    .map_err(|e| Error::git("add files", e))
            }
            "git_reset" => {
                let repo = self.repo(args)?;
                self.git
                    .reset_staged(&repo)
                    .map_err(|e| Error::git("reset", e))
            }
            "git_log" => {
                let repo = self.repo(args)?;
                let max_count = args.positive_count("max_count").unwrap_or(self.default_log_count);
                let entries = self
                    .git
                    .log(&repo, max_count)
                    .map_err(|e| Error::git("get log", e))?;
                Ok(format!("Commit history for {repo}:\n{}", entries.join("\n")))
            }
            "git_create_branch" => {
                let repo = self.repo(args)?;
                let name = args.required_str("branch_name")?;
                let base = args.optional_str("base_branch");
                self.git
                    .create_branch(&repo, name, base)
                    .map_err(|e| Error::git("create branch", e))
            }
            "git_checkout" => {
                let repo = self.repo(args)?;
                let name = args.required_str("branch_name")?;
                self.git
                    .checkout(&repo, name)
                    .map_err(|e| Error::git("checkout branch", e))
            }
            "git_show" => {
                let repo = self.repo(args)?;
                let revision = args.required_str("revision")?;
                self.git
                    .show(&repo, revision)
                    .map_err(|e| Error::git("show commit", e))
            }
            "git_init" => {
                let requested = args
                    .optional_str("repo_path")
                    .ok_or_else(|| {
                        Error::invalid_argument("repo_path", "must be specified for initialization")
                    })?;
                let path = self.validator.resolve_within(requested)?;
                self.git
                    .init(&path)
                    .map_err(|e| Error::git("initialize repository", e))
            }
            "git_push" => {
                let repo = self.repo(args)?;
                self.git
                    .push(&repo, args.optional_str("remote"), args.optional_str("branch"))
                    .map_err(|e| Error::git("push changes", e))
            }
            "git_pull" => {
                let repo = self.repo(args)?;
                self.git
                    .pull(&repo, args.optional_str("remote"), args.optional_str("branch"))
                    .map_err(|e| Error::git("pull changes", e))
            }
            "git_list_repositories" => Ok(list_repositories(self.validator.allowed_roots())),
            "git_apply_patch_string" => {
                let repo = self.repo(args)?;
                let patch = args.required_str("patch_string")?;
                if patch.trim().is_empty() {
                    return Err(Error::invalid_argument("patch_string", "cannot be empty"));
                }
                self.git
                    .apply_patch(&repo, patch)
                    .map_err(|e| Error::git("apply patch", e))
            }
            "git_apply_patch_file" => {
                let repo = self.repo(args)?;
                let patch_file = args.required_str("patch_file")?;
                if patch_file.trim().is_empty() {
                    return Err(Error::invalid_argument("patch_file", "cannot be empty"));
                }
                let patch_file = absolute_patch_path(patch_file)?;
                self.git
                    .apply_patch_file(&repo, &patch_file)
                    .map_err(|e| Error::git("apply patch", e))
            }
            _ => Err(Error::UnknownTool(name.to_string())),
        }
    }

    fn repo(&self, args: &Arguments<'_>) -> Result<RepoPath> {
        let requested = args.optional_str("repo_path").unwrap_or_default();
        Ok(self.validator.validate(requested)?)
    }
}

/// Borrowed view of a call's argument object.
struct Arguments<'a>(&'a Map<String, Value>);

impl Arguments<'_> {
    /// A non-empty string argument; other types and `""` read as absent.
    fn optional_str(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    fn required_str(&self, name: &'static str) -> Result<&str> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::invalid_argument(name, "must be a string"))
    }

    /// A whole number of at least one.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn positive_count(&self, name: &str) -> Option<usize> {
        let value = self.0.get(name)?;
        let count = match value.as_u64() {
            Some(n) => n,
            // Integral floats such as `5.0`.
            None => value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u64)?,
        };
        usize::try_from(count).ok().filter(|&n| n >= 1)
    }
}

fn parse_arguments(arguments: &Value) -> Result<Cow<'_, Map<String, Value>>> {
    match arguments {
        Value::Null => Ok(Cow::Owned(Map::new())),
        Value::Object(map) => Ok(Cow::Borrowed(map)),
        other => Err(Error::Arguments(format!(
            "expected a JSON object, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Split a `files` argument on commas, else on spaces.
fn split_files(files: &str) -> Vec<String> {
    let parts: Vec<&str> = if files.contains(',') {
        files.split(',').collect()
    } else if files.contains(' ') {
        files.split(' ').collect()
    } else {
        vec![files]
    };

    parts
        .into_iter()
        .map(str::trim)
        .filter(|file| !file.is_empty())
        .map(String::from)
        .collect()
}

fn absolute_patch_path(patch_file: &str) -> Result<PathBuf> {
    let path = std::path::absolute(Path::new(patch_file))?;
    if !path.exists() {
        return Err(Error::invalid_argument(
            "patch_file",
            format!("does not exist: {}", path.display()),
        ));
    }
    Ok(path)
}

fn list_repositories(roots: &[PathBuf]) -> String {
    if roots.is_empty() {
        return "No repositories configured".to_string();
    }

    let mut text = format!("Available repositories ({}):\n\n", roots.len());
    for (i, root) in roots.iter().enumerate() {
        let name = root
            .file_name()
            .map_or_else(|| root.to_string_lossy(), |name| name.to_string_lossy());
        text.push_str(&format!("{}. {name} ({})\n", i + 1, root.display()));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{GitError, Result as GitResult};
    use serde_json::json;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records every call and answers with canned text.
    #[derive(Debug, Default)]
    struct RecordingGit {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingGit {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn record(&self, call: String) -> GitResult<String> {
            self.calls.lock().unwrap().push(call.clone());
            if self.fail {
                return Err(GitError::CommandFailed {
                    command: call,
                    status: "exit status: 1".to_string(),
                    output: "boom".to_string(),
                });
            }
            Ok(format!("ok: {call}"))
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl GitOperations for RecordingGit {
        fn status(&self, _repo: &Path) -> GitResult<String> {
            self.record("status".to_string())
        }
        fn diff_unstaged(&self, _repo: &Path) -> GitResult<String> {
            self.record("diff_unstaged".to_string())
        }
        fn diff_staged(&self, _repo: &Path) -> GitResult<String> {
            self.record("diff_staged".to_string())
        }
        fn diff(&self, _repo: &Path, target: &str) -> GitResult<String> {
            self.record(format!("diff {target}"))
        }
        fn commit(&self, _repo: &Path, message: &str) -> GitResult<String> {
            self.record(format!("commit {message:?}"))
        }
        fn add(&self, _repo: &Path, files: &[String]) -> GitResult<String> {
            self.record(format!("add {files:?}"))
        }
        fn reset_staged(&self, _repo: &Path) -> GitResult<String> {
            self.record("reset".to_string())
        }
        fn log(&self, _repo: &Path, max_count: usize) -> GitResult<Vec<String>> {
            self.record(format!("log {max_count}"))?;
            Ok(vec!["Commit: a\n".to_string(), "Commit: b\n".to_string()])
        }
        fn create_branch(&self, _repo: &Path, name: &str, base: Option<&str>) -> GitResult<String> {
            self.record(format!("create_branch {name} {base:?}"))
        }
        fn checkout(&self, _repo: &Path, name: &str) -> GitResult<String> {
            self.record(format!("checkout {name}"))
        }
        fn init(&self, path: &Path) -> GitResult<String> {
            self.record(format!("init {}", path.display()))
        }
        fn show(&self, _repo: &Path, revision: &str) -> GitResult<String> {
            self.record(format!("show {revision}"))
        }
        fn push(
            &self,
            _repo: &Path,
            remote: Option<&str>,
            branch: Option<&str>,
        ) -> GitResult<String> {
            self.record(format!("push {remote:?} {branch:?}"))
        }
        fn pull(
            &self,
            _repo: &Path,
            remote: Option<&str>,
            branch: Option<&str>,
        ) -> GitResult<String> {
            self.record(format!("pull {remote:?} {branch:?}"))
        }
        fn apply_patch(&self, _repo: &Path, patch: &str) -> GitResult<String> {
            self.record(format!("apply_patch {}", patch.len()))
        }
        fn apply_patch_file(&self, _repo: &Path, patch_file: &Path) -> GitResult<String> {
            self.record(format!("apply_patch_file {}", patch_file.display()))
        }
    }

    struct Fixture {
        tmp: TempDir,
        root: PathBuf,
        tools: GitTools<RecordingGit>,
    }

    fn fixture_with(git: RecordingGit) -> Fixture {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("project");
        fs::create_dir_all(root.join(".git")).unwrap();
        let validator = PathValidator::new(vec![root.clone()]);
        let tools = GitTools::new(git, validator, Arc::new(BodyFilter::new()));
        Fixture {
            tmp,
            root,
            tools,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(RecordingGit::default())
    }

    #[test]
    fn test_status_uses_default_repository() {
        let f = fixture();
        let result = f.tools.call("git_status", &Value::Null);
        assert!(!result.is_error, "{}", result.text);
        assert_eq!(
            result.text,
            format!("Repository status for {}:\nok: status", f.root.display())
        );
    }

    #[test]
    fn test_diff_texts() {
        let f = fixture();
        let repo = f.root.display().to_string();

        let unstaged = f.tools.call("git_diff_unstaged", &json!({}));
        assert_eq!(unstaged.text, format!("Unstaged changes for {repo}:\nok: diff_unstaged"));

        let staged = f.tools.call("git_diff_staged", &json!({ "repo_path": repo }));
        assert_eq!(staged.text, format!("Staged changes for {repo}:\nok: diff_staged"));

        let diff = f.tools.call("git_diff", &json!({ "target": "main" }));
        assert_eq!(diff.text, format!("Diff with main for {repo}:\nok: diff main"));
    }

    #[test]
    fn test_required_argument_must_be_string() {
        let f = fixture();
        let result = f.tools.call("git_diff", &json!({ "target": 42 }));
        assert!(result.is_error);
        assert_eq!(result.text, "target must be a string");

        let result = f.tools.call("git_checkout", &json!({}));
        assert_eq!(result.text, "branch_name must be a string");
        assert!(f.tools.git().calls().is_empty());
    }

    #[test]
    fn test_arguments_must_be_object() {
        let f = fixture();
        let result = f.tools.call("git_status", &json!([1, 2]));
        assert!(result.is_error);
        assert_eq!(
            result.text,
            "Failed to parse arguments: expected a JSON object, got an array"
        );

        let result = f.tools.call_json("git_status", "{not json");
        assert!(result.is_error);
        assert!(result.text.starts_with("Failed to parse arguments: "));
    }

    #[test]
    fn test_repository_path_error() {
        crate::logging::init_test_logging();
        let f = fixture();
        let result = f
            .tools
            .call("git_status", &json!({ "repo_path": "/definitely/elsewhere" }));
        assert!(result.is_error);
        assert!(result.text.starts_with(
            "Repository path error: access denied - path outside allowed repositories"
        ));
        assert!(f.tools.git().calls().is_empty());
    }

    #[test]
    fn test_no_repository_configured() {
        let tools = GitTools::new(
            RecordingGit::default(),
            PathValidator::new(Vec::new()),
            Arc::new(BodyFilter::new()),
        );
        let result = tools.call("git_status", &json!({}));
        assert_eq!(
            result.text,
            "Repository path error: no repository specified and no defaults configured"
        );
    }

    #[test]
    fn test_commit_message_is_filtered() {
        let f = fixture();
        let result = f.tools.call(
            "git_commit",
            &json!({ "message": "Fix bug\n\nCo-Authored-By: Bot <bot@example.com>" }),
        );
        assert!(!result.is_error);
        assert_eq!(f.tools.git().calls(), vec!["commit \"Fix bug\"".to_string()]);
    }

    #[test]
    fn test_commit_message_empty_after_filtering() {
        let f = fixture();
        let result = f
            .tools
            .call("git_commit", &json!({ "message": "Co-Authored-By: Bot <bot@x.io>" }));
        assert!(result.is_error);
        assert_eq!(result.text, "message is empty after filtering");
        assert!(f.tools.git().calls().is_empty());
    }

    #[test]
    fn test_add_splits_files() {
        assert_eq!(split_files("a.rs, b.rs ,,c.rs"), vec!["a.rs", "b.rs", "c.rs"]);
        assert_eq!(split_files("a.rs  b.rs"), vec!["a.rs", "b.rs"]);
        assert_eq!(split_files("src/main.rs"), vec!["src/main.rs"]);
        assert!(split_files(" , ").is_empty());

        let f = fixture();
        let result = f.tools.call("git_add", &json!({ "files": "a.rs,b.rs" }));
        assert_eq!(result.text, "ok: add [\"a.rs\", \"b.rs\"]");

        let result = f.tools.call("git_add", &json!({ "files": " , " }));
        assert!(result.is_error);
        assert_eq!(result.text, "files must name at least one path");
    }

    #[test]
    fn test_log_max_count() {
        let f = fixture();
        let repo = f.root.display().to_string();

        let result = f.tools.call("git_log", &json!({}));
        assert_eq!(
            result.text,
            format!("Commit history for {repo}:\nCommit: a\n\nCommit: b\n")
        );
        f.tools.call("git_log", &json!({ "max_count": 3 }));
        f.tools.call("git_log", &json!({ "max_count": 0 }));
        f.tools.call("git_log", &json!({ "max_count": -4 }));
        f.tools.call("git_log", &json!({ "max_count": "7" }));
        f.tools.call("git_log", &json!({ "max_count": 5.0 }));

        assert_eq!(
            f.tools.git().calls(),
            vec!["log 10", "log 3", "log 10", "log 10", "log 10", "log 5"]
        );
    }

    #[test]
    fn test_custom_default_log_count() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".git")).unwrap();
        let tools = GitTools::new(
            RecordingGit::default(),
            PathValidator::new(vec![tmp.path().to_path_buf()]),
            Arc::new(BodyFilter::new()),
        )
        .with_default_log_count(25);

        tools.call("git_log", &json!({}));
        assert_eq!(tools.git().calls(), vec!["log 25"]);
    }

    #[test]
    fn test_branch_tools() {
        let f = fixture();
        f.tools.call("git_create_branch", &json!({ "branch_name": "feat" }));
        f.tools.call(
            "git_create_branch",
            &json!({ "branch_name": "feat2", "base_branch": "main" }),
        );
        f.tools.call("git_checkout", &json!({ "branch_name": "feat" }));
        f.tools.call("git_show", &json!({ "revision": "HEAD~1" }));

        assert_eq!(
            f.tools.git().calls(),
            vec![
                "create_branch feat None",
                "create_branch feat2 Some(\"main\")",
                "checkout feat",
                "show HEAD~1",
            ]
        );
    }

    #[test]
    fn test_push_and_pull_defaults() {
        let f = fixture();
        f.tools.call("git_push", &json!({}));
        f.tools.call("git_push", &json!({ "remote": "upstream", "branch": "dev" }));
        f.tools.call("git_pull", &json!({ "remote": "", "branch": 3 }));

        assert_eq!(
            f.tools.git().calls(),
            vec![
                "push None None",
                "push Some(\"upstream\") Some(\"dev\")",
                "pull None None",
            ]
        );
    }

    #[test]
    fn test_init_requires_path_inside_roots() {
        let f = fixture();
        let result = f.tools.call("git_init", &json!({}));
        assert_eq!(result.text, "repo_path must be specified for initialization");

        let inside = f.root.join("sub");
        let result = f
            .tools
            .call("git_init", &json!({ "repo_path": inside.to_str().unwrap() }));
        assert!(!result.is_error, "{}", result.text);

        let result = f.tools.call("git_init", &json!({ "repo_path": "/elsewhere/new" }));
        assert!(result.text.starts_with("Repository path error: access denied"));
        assert_eq!(
            f.tools.git().calls(),
            vec![format!("init {}", inside.display())]
        );
    }

    #[test]
    fn test_list_repositories() {
        let f = fixture();
        let result = f.tools.call("git_list_repositories", &json!({}));
        assert_eq!(
            result.text,
            format!("Available repositories (1):\n\n1. project ({})\n", f.root.display())
        );

        assert_eq!(list_repositories(&[]), "No repositories configured");
    }

    #[test]
    fn test_apply_patch_string() {
        let f = fixture();
        let result = f.tools.call("git_apply_patch_string", &json!({ "patch_string": "  \n" }));
        assert_eq!(result.text, "patch_string cannot be empty");

        let result = f
            .tools
            .call("git_apply_patch_string", &json!({ "patch_string": "diff --git" }));
        assert_eq!(result.text, "ok: apply_patch 10");
    }

    #[test]
    fn test_apply_patch_file() {
        let f = fixture();
        let patch = f.tmp.path().join("fix.patch");

        let result = f
            .tools
            .call("git_apply_patch_file", &json!({ "patch_file": patch.to_str().unwrap() }));
        assert!(result.is_error);
        assert!(result.text.starts_with("patch_file does not exist: "));

        fs::write(&patch, "diff --git a/x b/x\n").unwrap();
        let result = f
            .tools
            .call("git_apply_patch_file", &json!({ "patch_file": patch.to_str().unwrap() }));
        assert!(!result.is_error, "{}", result.text);
        assert_eq!(
            f.tools.git().calls(),
            vec![format!("apply_patch_file {}", patch.display())]
        );
    }

    #[test]
    fn test_git_failure_is_reported_with_action() {
        crate::logging::init_test_logging();
        let f = fixture_with(RecordingGit::failing());
        let result = f.tools.call("git_reset", &json!({}));
        assert!(result.is_error);
        assert_eq!(
            result.text,
            "Failed to reset: git command failed: reset (exit status: 1)\nOutput: boom"
        );
    }

    #[test]
    fn test_unknown_tool() {
        let f = fixture();
        let result = f.tools.call("git_frobnicate", &json!({}));
        assert!(result.is_error);
        assert_eq!(result.text, "Unknown tool: git_frobnicate");
    }

    #[test]
    fn test_definitions_cover_every_tool() {
        let f = fixture();
        let definitions = f.tools.definitions();
        assert_eq!(definitions.len(), 17);
        assert_eq!(definitions[0].name, "git_status");
        assert_eq!(definitions[0].title, "Git status");
        assert!(definitions.iter().all(|d| !d.description.is_empty()));
    }

    #[test]
    fn test_tool_result_serializes() {
        let value = serde_json::to_value(ToolResult::error("nope")).unwrap();
        assert_eq!(value, json!({ "text": "nope", "is_error": true }));
    }
}
