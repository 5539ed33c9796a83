//! Command dispatch
//!
//! Each CLI verb maps to one function here. One-shot verbs call git
//! directly; the two list verbs build a picker from git output, run it on
//! the terminal, and act on the result.

mod files;
mod sessions;

pub use files::*;
pub use sessions::*;

use tracing::info;

use crate::clipboard::ClipboardSink;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::git::{Git, GitRunner};
use crate::tui::{Picker, run_picker};

/// Switch to `name`, creating the branch if needed
pub async fn branch<R: GitRunner>(git: &Git<R>, name: &str) -> Result<()> {
    git.switch_branch(name).await
}

/// Commit with the words joined into one message, then push
pub async fn commit<R: GitRunner>(git: &Git<R>, words: &[String], push: bool) -> Result<()> {
    let message = words.join(" ");
    let message = message.trim();
    if message.is_empty() {
        return Err(Error::EmptyCommitMessage);
    }

    commit_and_push(git, message, push).await
}

/// Stash everything, untracked files included, as a named session
pub async fn save_session<R: GitRunner>(git: &Git<R>, name: &str) -> Result<()> {
    git.save_session(name).await
}

/// Commit the index and optionally push
pub async fn commit_and_push<R: GitRunner>(git: &Git<R>, message: &str, push: bool) -> Result<()> {
    git.commit(message).await?;
    if push {
        git.push().await?;
    }
    Ok(())
}

/// Interactive staging followed by the optional commit flow
pub async fn list_files<R: GitRunner>(
    git: &Git<R>,
    config: &Config,
    clipboard: Option<&mut dyn ClipboardSink>,
) -> Result<()> {
    let (mode, state) = load_files(git).await?;
    let state = run_picker(Picker::new(mode, state)).await?;
    info!(
        "Staging picker closed with {:?}, {} marked",
        state.action(),
        state.marked_count()
    );

    let mut prompt = TerminalPrompt::new(config.commit_message_limit);
    finish_files(git, &state, clipboard, &mut prompt, config.push_after_commit).await
}

/// Interactive session restore/drop
pub async fn list_sessions<R: GitRunner>(git: &Git<R>) -> Result<()> {
    let state = load_sessions(git).await?;
    let state = run_picker(Picker::new(SessionMode, state)).await?;
    info!("Session picker closed with {:?}", state.action());

    finish_sessions(git, &state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::FakeRunner;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_commit_joins_words() {
        let git = Git::new(FakeRunner::new());
        let words = vec!["fix".to_string(), "the".to_string(), "build".to_string()];

        commit(&git, &words, true).await.unwrap();
        assert_eq!(git.runner().calls(), vec!["commit -m fix the build", "push"]);
    }

    #[tokio::test]
    async fn test_commit_failure_skips_push() {
        let git = Git::new(FakeRunner::new().fail("commit -m wip", "nothing added to commit"));

        let err = commit(&git, &["wip".to_string()], true).await.unwrap_err();
        assert!(matches!(err, Error::ExecutionFailed { .. }));
        assert_eq!(git.runner().calls(), vec!["commit -m wip"]);
    }

    #[tokio::test]
    async fn test_commit_blank_message() {
        let git = Git::new(FakeRunner::new());
        let err = commit(&git, &[" ".to_string()], true).await.unwrap_err();
        assert!(matches!(err, Error::EmptyCommitMessage));
        assert!(git.runner().calls().is_empty());
    }

    #[tokio::test]
    async fn test_save_session() {
        let git = Git::new(FakeRunner::new());
        save_session(&git, "spike").await.unwrap();
        assert_eq!(
            git.runner().calls(),
            vec!["stash push --include-untracked -m spike"]
        );
    }
}
