//! Command templates for the git pipelines.
//!
//! Everything here is pure: the functions only build command strings, they
//! never execute anything. Values that come from the repository configuration
//! (remote, URL, branch, path) are quoted for the target shell before they are
//! interpolated. User-supplied hook commands (`prepull`, `postpull`) are
//! inserted verbatim.

use std::borrow::Cow;
use std::path::Path;

use crate::domain::entities::RepositoryConfig;
use crate::domain::value_objects::{CommandPipeline, Platform};

/// Environment variable that points git at a repository directory
pub const GIT_DIR_VAR: &str = "GIT_DIR";

const POSIX_SAFE_CHARS: &str = "-_./:@=+,%^";

// `%` and `^` are cmd.exe metacharacters
const WINDOWS_SAFE_CHARS: &str = "-_./:@=+,\\";

fn is_shell_safe(value: &str, extra: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || extra.contains(c))
}

/// Quote `value` as a single POSIX shell word
pub fn quote_posix(value: &str) -> Cow<'_, str> {
    if is_shell_safe(value, POSIX_SAFE_CHARS) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(format!("'{}'", value.replace('\'', "'\\''")))
}

/// Quote `value` as a single `cmd.exe` argument
///
/// cmd expands `%NAME%` even inside double quotes, so each `%` is emitted
/// outside the quotes with a `^` escape. The program still receives one
/// argument because adjacent quoted segments are joined when it parses its
/// command line.
pub fn quote_windows(value: &str) -> Cow<'_, str> {
    if is_shell_safe(value, WINDOWS_SAFE_CHARS) {
        return Cow::Borrowed(value);
    }

    // Backslashes are only special right before a `"`, where they are doubled
    let mut quoted = String::with_capacity(value.len() + 2);
    let mut backslashes = 0;
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => {
                backslashes += 1;
                quoted.push(c);
                continue;
            }
            '"' => {
                quoted.push_str(&"\\".repeat(backslashes));
                quoted.push_str("\"\"");
            }
            '%' => {
                quoted.push_str(&"\\".repeat(backslashes));
                quoted.push_str("\"^%\"");
            }
            _ => quoted.push(c),
        }
        backslashes = 0;
    }
    quoted.push_str(&"\\".repeat(backslashes));
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Quote `value` for the shell of `platform`
pub fn quote(platform: Platform, value: &str) -> Cow<'_, str> {
    match platform {
        Platform::Posix => quote_posix(value),
        Platform::Windows => quote_windows(value),
    }
}

/// `GIT_DIR` reset for POSIX shells: a plain unset
pub fn posix_unset_git_dir(_path: &Path) -> String {
    format!("unset {}", GIT_DIR_VAR)
}

/// `GIT_DIR` reset for Windows hosts
///
/// `cmd.exe` has no `unset`, so the reset runs as a nested bash invocation
/// that changes into `path` first. The path is quoted for bash; Windows paths
/// cannot contain `"`, and any `%` is escaped for cmd.
pub fn windows_unset_git_dir(path: &Path) -> String {
    let script = format!(
        "cd {} && unset {}",
        quote_posix(&path.to_string_lossy()),
        GIT_DIR_VAR
    );
    format!("bash -c \"{}\"", script.replace('%', "\"^%\""))
}

/// Builds git command strings and pipelines for one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GitCommands {
    platform: Platform,
}

impl Default for GitCommands {
    fn default() -> Self {
        Self::new(Platform::detect())
    }
}

impl GitCommands {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    fn q<'a>(&self, value: &'a str) -> Cow<'a, str> {
        quote(self.platform, value)
    }

    /// Reset `GIT_DIR` for commands that run inside `path`
    pub fn unset_git_dir_in(&self, path: &Path) -> String {
        match self.platform {
            Platform::Posix => posix_unset_git_dir(path),
            Platform::Windows => windows_unset_git_dir(path),
        }
    }

    /// Reset `GIT_DIR` before a clone, when the target does not exist yet
    pub fn unset_git_dir(&self) -> String {
        match self.platform {
            Platform::Posix => format!("unset {}", GIT_DIR_VAR),
            Platform::Windows => format!("bash -c \"unset {}\"", GIT_DIR_VAR),
        }
    }

    pub fn remote_set_url(&self, remote: &str, url: &str) -> String {
        format!("git remote set-url {} {}", self.q(remote), self.q(url))
    }

    pub fn fetch(&self, remote: &str) -> String {
        format!("git fetch {}", self.q(remote))
    }

    /// Force-create or reset the local branch to track `remote/branch`
    pub fn checkout_tracking(&self, remote: &str, branch: &str) -> String {
        let upstream = format!("{}/{}", remote, branch);
        format!(
            "git checkout -f -B {} -t {}",
            self.q(branch),
            self.q(&upstream)
        )
    }

    pub fn reset_hard(&self, remote: &str, branch: &str) -> String {
        let upstream = format!("{}/{}", remote, branch);
        format!("git reset --hard {}", self.q(&upstream))
    }

    pub fn submodule_update(&self) -> String {
        "git submodule update --init --recursive".to_string()
    }

    pub fn clone_recursive(&self, url: &str, branch: &str, path: &Path) -> String {
        let path = path.to_string_lossy();
        format!(
            "git clone --recursive {} -b {} {}",
            self.q(url),
            self.q(branch),
            self.q(&path)
        )
    }

    /// Point an existing working copy at the configured remote and branch
    pub fn init_pipeline(&self, config: &RepositoryConfig, path: &Path) -> CommandPipeline {
        let mut pipeline = CommandPipeline::new();
        pipeline.push(self.unset_git_dir_in(path));
        pipeline.push(self.remote_set_url(&config.remote, &config.url));
        pipeline.push(self.fetch(&config.remote));
        pipeline.push(self.checkout_tracking(&config.remote, &config.branch));
        pipeline.push(self.submodule_update());
        pipeline
    }

    /// Bring an existing working copy up to date, with optional hooks
    pub fn pull_pipeline(&self, config: &RepositoryConfig, path: &Path) -> CommandPipeline {
        let mut pipeline = CommandPipeline::new();
        pipeline.push(self.unset_git_dir_in(path));
        pipeline.push_optional(config.prepull.as_deref());
        pipeline.push(self.fetch(&config.remote));
        pipeline.push(self.reset_hard(&config.remote, &config.branch));
        pipeline.push(self.submodule_update());
        pipeline.push_optional(config.postpull.as_deref());
        pipeline
    }

    /// Create the working copy at `path`
    pub fn clone_pipeline(&self, config: &RepositoryConfig, path: &Path) -> CommandPipeline {
        let mut pipeline = CommandPipeline::new();
        pipeline.push(self.unset_git_dir());
        pipeline.push(self.clone_recursive(&config.url, &config.branch, path));
        pipeline
    }
}
