//! Local git history extraction
//!
//! Reads the repository's commit log through libgit2 and adapts it to
//! the temporal analyzer's input types. Two pieces: a bulk walk of the
//! recent log (message + author timestamp only, cheap) and an
//! on-demand [`CommitSource`] that materializes one commit's diff when
//! the drift sampler asks for it. Detail retrieval never fails the
//! scan; any libgit2 error degrades to `None`.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use git2::{Commit, DiffOptions, Patch, Repository};
use tracing::{debug, warn};

use crate::temporal::{CommitDetail, CommitFilePatch, CommitInfo, CommitSource};

/// Commit-log access for one opened repository.
pub struct GitHistory {
    repo: Repository,
}

impl GitHistory {
    /// Open the repository at (or above) `path`. Returns `None` for
    /// directories that are not inside a work tree.
    pub fn discover(path: &Path) -> Option<Self> {
        match Repository::discover(path) {
            Ok(repo) => Some(Self { repo }),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no git repository");
                None
            }
        }
    }

    /// The most recent `max_commits` commits from HEAD, newest first.
    pub fn recent_commits(&self, max_commits: usize) -> Result<Vec<CommitInfo>> {
        let mut walk = self.repo.revwalk().context("starting revision walk")?;
        walk.push_head().context("resolving HEAD")?;
        walk.set_sorting(git2::Sort::TIME)
            .context("setting walk order")?;

        let mut commits = Vec::new();
        for oid in walk.take(max_commits) {
            let oid = oid.context("walking revisions")?;
            let commit = self.repo.find_commit(oid).context("loading commit")?;
            commits.push(CommitInfo {
                sha: oid.to_string(),
                message: commit.message().unwrap_or("").to_string(),
                author_date: author_date(&commit),
            });
        }
        debug!(count = commits.len(), "commit log loaded");
        Ok(commits)
    }

    fn detail(&self, sha: &str) -> Result<CommitDetail> {
        let oid = git2::Oid::from_str(sha).context("parsing commit id")?;
        let commit = self.repo.find_commit(oid).context("loading commit")?;
        let tree = commit.tree().context("loading commit tree")?;
        // Root commits diff against an empty tree
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree().context("loading parent tree")?),
            Err(_) => None,
        };

        let mut opts = DiffOptions::new();
        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))
            .context("computing diff")?;

        let stats = diff.stats().context("computing diff stats")?;
        let mut files = Vec::new();
        for (index, delta) in diff.deltas().enumerate() {
            let path = delta
                .new_file()
                .path()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();
            let patch_text = match Patch::from_diff(&diff, index) {
                Ok(Some(mut patch)) => patch
                    .to_buf()
                    .ok()
                    .and_then(|buf| buf.as_str().map(str::to_string))
                    .unwrap_or_default(),
                _ => String::new(),
            };
            files.push(CommitFilePatch {
                path,
                patch: patch_text,
            });
        }

        Ok(CommitDetail {
            sha: sha.to_string(),
            files,
            additions: stats.insertions(),
            deletions: stats.deletions(),
        })
    }
}

impl CommitSource for GitHistory {
    fn commit_detail(&self, sha: &str) -> Option<CommitDetail> {
        match self.detail(sha) {
            Ok(detail) => Some(detail),
            Err(err) => {
                warn!(sha, error = %err, "commit detail unavailable");
                None
            }
        }
    }
}

/// Author timestamp with the author's recorded UTC offset.
fn author_date(commit: &Commit<'_>) -> DateTime<FixedOffset> {
    let when = commit.author().when();
    let offset = FixedOffset::east_opt(when.offset_minutes() * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
    DateTime::from_timestamp(when.seconds(), 0)
        .map(|utc| utc.with_timezone(&offset))
        .unwrap_or_else(|| {
            DateTime::from_timestamp(0, 0)
                .expect("epoch is representable")
                .with_timezone(&offset)
        })
}
