//! Typed git operations
//!
//! [`Git`] turns the handful of git invocations wrk needs into methods,
//! parsing their output where there is any.

use std::collections::HashSet;

use tracing::{debug, info};

use super::parse::{StatusEntry, parse_stash_list, parse_status, staged_subset};
use super::runner::GitRunner;
use crate::error::{Error, Result};

/// Git operations on top of a [`GitRunner`]
pub struct Git<R> {
    runner: R,
}

impl<R: GitRunner> Git<R> {
    /// Wrap a runner
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Access the underlying runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Changed and untracked entries, in status order
    pub async fn status(&self) -> Result<Vec<StatusEntry>> {
        let output = self
            .runner
            .run(&["status", "-u", "--porcelain", "-z"])
            .await?;
        Ok(parse_status(&output))
    }

    /// Changed and untracked file paths, in status order
    pub async fn changed_files(&self) -> Result<Vec<String>> {
        let entries = self.status().await?;
        Ok(entries.into_iter().map(|entry| entry.path).collect())
    }

    /// Which of `files` are currently staged
    pub async fn staged_files(&self, files: &[String]) -> Result<HashSet<String>> {
        let output = self
            .runner
            .run(&["diff", "--name-only", "--cached", "-z"])
            .await?;
        Ok(staged_subset(files, &output))
    }

    /// Add a file to the index
    pub async fn stage(&self, file: &str) -> Result<()> {
        self.runner.run(&["add", "--", file]).await?;
        debug!("Staged {}", file);
        Ok(())
    }

    /// Remove a file from the index, keeping working tree changes
    pub async fn unstage(&self, file: &str) -> Result<()> {
        self.runner.run(&["restore", "--staged", "--", file]).await?;
        debug!("Unstaged {}", file);
        Ok(())
    }

    /// Unstage a rename, restoring both its destination and its source
    pub async fn unstage_rename(&self, file: &str, origin: &str) -> Result<()> {
        self.runner
            .run(&["restore", "--staged", "--", file, origin])
            .await?;
        debug!("Unstaged {} (renamed from {})", file, origin);
        Ok(())
    }

    /// Throw away working tree changes to a file
    pub async fn discard(&self, file: &str) -> Result<()> {
        self.runner.run(&["restore", "--", file]).await?;
        debug!("Discarded changes to {}", file);
        Ok(())
    }

    /// Commit the index with `message`
    pub async fn commit(&self, message: &str) -> Result<()> {
        self.runner.run(&["commit", "-m", message]).await?;
        info!("Committed: {}", message);
        Ok(())
    }

    /// Push the current branch
    pub async fn push(&self) -> Result<()> {
        self.runner.run(&["push"]).await?;
        info!("Pushed");
        Ok(())
    }

    /// Check whether a local branch exists
    pub async fn branch_exists(&self, name: &str) -> Result<bool> {
        let reference = format!("refs/heads/{}", name);
        match self
            .runner
            .run(&["show-ref", "--verify", "--quiet", &reference])
            .await
        {
            Ok(_) => Ok(true),
            // show-ref exits non-zero when the reference does not exist
            Err(Error::ExecutionFailed { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Switch to `name`, creating the branch first if it does not exist
    pub async fn switch_branch(&self, name: &str) -> Result<()> {
        if self.branch_exists(name).await? {
            self.runner.run(&["checkout", name]).await?;
            info!("Switched to branch {}", name);
        } else {
            self.runner.run(&["checkout", "-b", name]).await?;
            info!("Created and switched to branch {}", name);
        }
        Ok(())
    }

    /// Stash all changes, untracked files included, under `name`
    pub async fn save_session(&self, name: &str) -> Result<()> {
        self.runner
            .run(&["stash", "push", "--include-untracked", "-m", name])
            .await?;
        info!("Saved session {}", name);
        Ok(())
    }

    /// Saved sessions, most recent first
    pub async fn sessions(&self) -> Result<Vec<String>> {
        let output = self.runner.run(&["stash", "list"]).await?;
        Ok(parse_stash_list(&output))
    }

    /// Restore the session at `index` (index included) and remove it from the stash
    pub async fn pop_session(&self, index: usize) -> Result<()> {
        let index = index.to_string();
        self.runner.run(&["stash", "pop", "--index", &index]).await?;
        info!("Restored session {}", index);
        Ok(())
    }

    /// Discard the session at `index`
    pub async fn drop_session(&self, index: usize) -> Result<()> {
        let index = index.to_string();
        self.runner.run(&["stash", "drop", &index]).await?;
        info!("Dropped session {}", index);
        Ok(())
    }
}
