//! Test fixtures: configs and local git remotes

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use git_autodeploy::domain::entities::RepositoryConfig;

pub const TEST_URL: &str = "git@example.com:team/app.git";

/// Repository config rooted in a temporary directory
pub fn repo_config(path: &Path) -> RepositoryConfig {
    RepositoryConfig::new(TEST_URL).with_path(path).with_branch("main")
}

/// Write `content` to `name` inside `dir`
pub fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path
}

/// Whether a usable git binary is on PATH
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=autodeploy",
            "-c",
            "user.email=autodeploy@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .env_remove("GIT_DIR")
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

/// Local remote with one commit on `main`
pub struct LocalRemote {
    pub root: TempDir,
    pub bare: PathBuf,
    seed: PathBuf,
}

impl LocalRemote {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let bare = root.path().join("remote.git");
        let seed = root.path().join("seed");

        std::fs::create_dir_all(&bare).unwrap();
        git(&bare, &["init", "--bare", "--quiet"]);
        git(&bare, &["symbolic-ref", "HEAD", "refs/heads/main"]);

        std::fs::create_dir_all(&seed).unwrap();
        git(&seed, &["init", "--quiet"]);
        git(&seed, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        git(&seed, &["remote", "add", "origin", bare.to_str().unwrap()]);

        let remote = Self { root, bare, seed };
        remote.commit("README.md", "first\n");
        remote
    }

    pub fn url(&self) -> String {
        self.bare.to_string_lossy().to_string()
    }

    /// Commit `content` to `file` and push it to `main`
    pub fn commit(&self, file: &str, content: &str) {
        std::fs::write(self.seed.join(file), content).unwrap();
        git(&self.seed, &["add", file]);
        git(&self.seed, &["commit", "-q", "-m", &format!("update {}", file)]);
        git(&self.seed, &["push", "-q", "origin", "main"]);
    }

    /// Path for a working copy that does not exist yet
    pub fn working_copy_path(&self) -> PathBuf {
        self.root.path().join("deploy").join("app")
    }
}
