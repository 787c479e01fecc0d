//! The static table of tools and their parameters.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::translations::Translations;

const REPO_PATH_DESCRIPTION: &str =
    "Path to Git repository (optional if default repository is configured)";

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// A JSON string.
    String,
    /// A JSON number.
    Number,
}

/// One parameter of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolParam {
    /// Argument name.
    pub name: &'static str,
    /// Expected JSON type.
    #[serde(rename = "type")]
    pub kind: ParamKind,
    /// Whether the call fails without it.
    pub required: bool,
    /// Human-readable description.
    pub description: &'static str,
}

impl ToolParam {
    const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::String,
            required: false,
            description,
        }
    }

    const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }
}

const REPO_PATH: ToolParam = ToolParam::string("repo_path", REPO_PATH_DESCRIPTION);

#[derive(Debug)]
pub(crate) struct ToolSpec {
    pub(crate) name: &'static str,
    title: &'static str,
    description: &'static str,
    read_only: bool,
    params: &'static [ToolParam],
}

impl ToolSpec {
    fn translation_key(&self, suffix: &str) -> String {
        format!("TOOL_{}_{suffix}", self.name.to_uppercase())
    }

    fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in self.params {
            properties.insert(
                param.name.to_string(),
                json!({ "type": param.kind, "description": param.description }),
            );
            if param.required {
                required.push(param.name);
            }
        }

        let mut schema = json!({ "type": "object", "properties": properties });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }

    pub(crate) fn definition(&self, translations: &Translations) -> ToolDefinition {
        ToolDefinition {
            name: self.name,
            title: translations.lookup(&self.translation_key("USER_TITLE"), self.title),
            description: translations
                .lookup(&self.translation_key("DESCRIPTION"), self.description),
            read_only: self.read_only,
            params: self.params,
            input_schema: self.input_schema(),
        }
    }
}

/// A tool as presented to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    /// Name used to call the tool.
    pub name: &'static str,
    /// Short title.
    pub title: String,
    /// What the tool does.
    pub description: String,
    /// True when the tool never modifies a repository.
    pub read_only: bool,
    /// Accepted parameters.
    #[serde(skip)]
    pub params: &'static [ToolParam],
    /// JSON schema of the arguments object.
    pub input_schema: Value,
}

pub(crate) static TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "git_status",
        title: "Git status",
        description: "Shows the working tree status of a local Git repository",
        read_only: true,
        params: &[REPO_PATH],
    },
    ToolSpec {
        name: "git_diff_unstaged",
        title: "Git diff unstaged",
        description: "Shows changes in the working directory that are not yet staged",
        read_only: true,
        params: &[REPO_PATH],
    },
    ToolSpec {
        name: "git_diff_staged",
        title: "Git diff staged",
        description: "Shows changes that are staged for commit",
        read_only: true,
        params: &[REPO_PATH],
    },
    ToolSpec {
        name: "git_diff",
        title: "Git diff",
        description: "Shows differences between branches or commits",
        read_only: true,
        params: &[
            REPO_PATH,
            ToolParam::string("target", "Target branch or commit to compare with").required(),
        ],
    },
    ToolSpec {
        name: "git_commit",
        title: "Git commit",
        description: "Records changes to the repository",
        read_only: false,
        params: &[
            REPO_PATH,
            ToolParam::string("message", "Commit message").required(),
        ],
    },
    ToolSpec {
        name: "git_add",
        title: "Git add",
        description: "Adds file contents to the staging area",
        read_only: false,
        params: &[
            REPO_PATH,
            ToolParam::string("files", "Comma-separated list of file paths to stage").required(),
        ],
    },
    ToolSpec {
        name: "git_reset",
        title: "Git reset",
        description: "Unstages all staged changes",
        read_only: false,
        params: &[REPO_PATH],
    },
    ToolSpec {
        name: "git_log",
        title: "Git log",
        description: "Shows the commit logs",
        read_only: true,
        params: &[
            REPO_PATH,
            ToolParam {
                name: "max_count",
                kind: ParamKind::Number,
                required: false,
                description: "Maximum number of commits to show (default: 10)",
            },
        ],
    },
    ToolSpec {
        name: "git_create_branch",
        title: "Git create branch",
        description:
            "Creates a new branch from an optional base branch and automatically checks it out",
        read_only: false,
        params: &[
            REPO_PATH,
            ToolParam::string("branch_name", "Name of the new branch").required(),
            ToolParam::string("base_branch", "Starting point for the new branch (optional)"),
        ],
    },
    ToolSpec {
        name: "git_checkout",
        title: "Git checkout",
        description: "Switches branches",
        read_only: false,
        params: &[
            REPO_PATH,
            ToolParam::string("branch_name", "Name of branch to checkout").required(),
        ],
    },
    ToolSpec {
        name: "git_show",
        title: "Git show",
        description: "Shows the contents of a commit",
        read_only: true,
        params: &[
            REPO_PATH,
            ToolParam::string(
                "revision",
                "The revision (commit hash, branch name, tag) to show",
            )
            .required(),
        ],
    },
    ToolSpec {
        name: "git_init",
        title: "Git init",
        description: "Initialize a new Git repository",
        read_only: false,
        params: &[
            ToolParam::string("repo_path", "Path to directory to initialize git repo").required(),
        ],
    },
    ToolSpec {
        name: "git_push",
        title: "Git push",
        description:
            "Pushes local commits to a remote repository and automatically sets up tracking",
        read_only: false,
        params: &[
            REPO_PATH,
            ToolParam::string("remote", "Remote name (default: origin)"),
            ToolParam::string("branch", "Branch name to push (default: current branch)"),
        ],
    },
    ToolSpec {
        name: "git_pull",
        title: "Git pull",
        description: "Pulls changes from a remote repository with automatic rebase and prune",
        read_only: false,
        params: &[
            REPO_PATH,
            ToolParam::string("remote", "Remote name (default: origin)"),
            ToolParam::string(
                "branch",
                "Branch name to pull (default: current branch's upstream)",
            ),
        ],
    },
    ToolSpec {
        name: "git_list_repositories",
        title: "Git list repositories",
        description: "Lists all available Git repositories",
        read_only: true,
        params: &[],
    },
    ToolSpec {
        name: "git_apply_patch_string",
        title: "Git apply patch string",
        description: "Applies a patch from a string to a git repository",
        read_only: false,
        params: &[
            REPO_PATH,
            ToolParam::string("patch_string", "Patch string to apply").required(),
        ],
    },
    ToolSpec {
        name: "git_apply_patch_file",
        title: "Git apply patch file",
        description: "Applies a patch from a file to a git repository",
        read_only: false,
        params: &[
            REPO_PATH,
            ToolParam::string("patch_file", "Path to the patch file").required(),
        ],
    },
];

/// Names of every tool, in catalogue order.
pub fn tool_names() -> impl Iterator<Item = &'static str> {
    TOOLS.iter().map(|spec| spec.name)
}
