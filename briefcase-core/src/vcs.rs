//! Version-control probing.
//!
//! The build and sync pipelines never shell out directly; they ask a
//! [`VersionControl`] implementation. [`GitCli`] is the production one and
//! runs the `git` executable. Every method reports unavailability through
//! [`VcsError`] and callers degrade gracefully.

use std::collections::BTreeSet;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

use crate::error::VcsError;

/// Remote branches compared against, in order of preference.
pub const REMOTE_DEFAULT_BRANCHES: &[&str] = &["origin/main", "origin/master"];

/// How far a checkout trails its remote default branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLag {
    /// Commits on the remote branch that are not in `HEAD`.
    pub behind: u64,
    /// The remote branch compared against (e.g. `origin/main`).
    pub branch: String,
}

/// Read-only queries against the repository containing a directory.
pub trait VersionControl {
    /// Commit id checked out at `repo`.
    fn head_commit(&self, repo: &Path) -> Result<String, VcsError>;

    /// Refresh remote-tracking refs and report whether `HEAD` is behind the
    /// remote default branch. `Ok(None)` means up to date or nothing to
    /// compare against.
    fn remote_lag(&self, repo: &Path) -> Result<Option<RemoteLag>, VcsError>;

    /// Paths under `pathspec` that are modified-but-unstaged or untracked,
    /// sorted and relative to `repo`.
    fn unstaged_paths(&self, repo: &Path, pathspec: &str) -> Result<Vec<String>, VcsError>;
}

/// [`VersionControl`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    fetch_timeout: Duration,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound for `git fetch` during [`VersionControl::remote_lag`].
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    fn command(repo: &Path, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(repo).args(args);
        cmd
    }

    fn describe(args: &[&str]) -> String {
        format!("git {}", args.join(" "))
    }

    fn run(&self, repo: &Path, args: &[&str]) -> Result<String, VcsError> {
        let output = Self::command(repo, args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| VcsError::Spawn {
                command: Self::describe(args),
                source,
            })?;
        if !output.status.success() {
            return Err(VcsError::Failed {
                command: Self::describe(args),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run without capturing output, killing the child after `timeout`.
    fn run_bounded(&self, repo: &Path, args: &[&str], timeout: Duration) -> Result<(), VcsError> {
        let command = Self::describe(args);
        let mut child = Self::command(repo, args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| VcsError::Spawn {
                command: command.clone(),
                source,
            })?;

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) if status.success() => return Ok(()),
                Ok(Some(status)) => {
                    return Err(VcsError::Failed {
                        command,
                        status,
                        stderr: String::new(),
                    })
                }
                Ok(None) if Instant::now() < deadline => sleep(Duration::from_millis(50)),
                Ok(None) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(VcsError::Timeout {
                        command,
                        after: timeout,
                    });
                }
                Err(source) => {
                    let _ = child.kill();
                    return Err(VcsError::Spawn { command, source });
                }
            }
        }
    }

    fn ensure_repository(&self, repo: &Path) -> Result<(), VcsError> {
        match self.run(repo, &["rev-parse", "--git-dir"]) {
            Ok(_) => Ok(()),
            Err(VcsError::Failed { .. }) => Err(VcsError::NotARepository {
                path: repo.to_path_buf(),
            }),
            Err(other) => Err(other),
        }
    }

    fn rev_parse(&self, repo: &Path, rev: &str) -> Result<String, VcsError> {
        Ok(self.run(repo, &["rev-parse", rev])?.trim().to_string())
    }
}

impl VersionControl for GitCli {
    fn head_commit(&self, repo: &Path) -> Result<String, VcsError> {
        self.ensure_repository(repo)?;
        self.rev_parse(repo, "HEAD")
    }

    fn remote_lag(&self, repo: &Path) -> Result<Option<RemoteLag>, VcsError> {
        self.ensure_repository(repo)?;
        self.run_bounded(repo, &["fetch", "--quiet"], self.fetch_timeout)?;

        let local = self.rev_parse(repo, "HEAD")?;
        let Some((branch, remote)) = REMOTE_DEFAULT_BRANCHES
            .iter()
            .find_map(|b| self.rev_parse(repo, b).ok().map(|sha| (*b, sha)))
        else {
            tracing::debug!("no remote default branch found in {}", repo.display());
            return Ok(None);
        };
        if local == remote {
            return Ok(None);
        }

        let range = format!("{local}..{remote}");
        let args = ["rev-list", "--count", range.as_str()];
        let raw = self.run(repo, &args)?;
        let behind = raw.trim().parse::<u64>().map_err(|_| VcsError::Parse {
            command: Self::describe(&args),
            output: raw.trim().to_string(),
        })?;
        if behind == 0 {
            return Ok(None);
        }
        Ok(Some(RemoteLag {
            behind,
            branch: branch.to_string(),
        }))
    }

    fn unstaged_paths(&self, repo: &Path, pathspec: &str) -> Result<Vec<String>, VcsError> {
        self.ensure_repository(repo)?;
        let mut paths = BTreeSet::new();
        let modified = self.run(repo, &["diff", "--relative", "--name-only", "--", pathspec])?;
        let untracked = self.run(
            repo,
            &["ls-files", "--others", "--exclude-standard", "--", pathspec],
        )?;
        for line in modified.lines().chain(untracked.lines()) {
            if !line.is_empty() {
                paths.insert(line.to_string());
            }
        }
        Ok(paths.into_iter().collect())
    }
}
