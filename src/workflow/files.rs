//! Interactive staging
//!
//! Lists changed files, lets the user stage, unstage and discard them, and
//! on confirm commits the staged set with a prompted message.

use std::collections::HashMap;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use super::commit_and_push;
use crate::clipboard::ClipboardSink;
use crate::error::{Error, Result};
use crate::git::{Git, GitRunner};
use crate::tui::{Action, PickerMode, PickerState, TextInput, run_prompt};

/// Placeholder shown in the empty commit message field
pub const MESSAGE_PLACEHOLDER: &str = "initial commit";

/// Staging picker: toggling stages/unstages, removing discards changes
pub struct StagingMode<'a, R> {
    git: &'a Git<R>,
    /// Source path of each listed rename, keyed by destination
    renamed_from: HashMap<String, String>,
}

impl<'a, R: GitRunner> StagingMode<'a, R> {
    pub fn new(git: &'a Git<R>) -> Self {
        Self {
            git,
            renamed_from: HashMap::new(),
        }
    }

    /// Remember rename sources so unstaging a rename restores both paths
    pub fn with_renames(mut self, renamed_from: HashMap<String, String>) -> Self {
        self.renamed_from = renamed_from;
        self
    }
}

#[async_trait]
impl<'a, R: GitRunner> PickerMode for StagingMode<'a, R> {
    fn title(&self) -> &str {
        "What files do you want to (un)stage?"
    }

    fn key_hints(&self) -> &[(&'static str, &'static str)] {
        &[
            ("enter", "(un)stage"),
            ("d", "discard"),
            ("c", "commit"),
            ("q", "quit"),
        ]
    }

    fn shows_marks(&self) -> bool {
        true
    }

    fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => Some(Action::Toggle),
            (KeyCode::Delete, _) | (KeyCode::Char('d'), KeyModifiers::NONE) => Some(Action::Remove),
            (KeyCode::Char('c'), KeyModifiers::NONE) => Some(Action::Confirm),
            _ => None,
        }
    }

    async fn toggle(&self, item: &str, marked: bool) -> Result<()> {
        if marked {
            match self.renamed_from.get(item) {
                Some(origin) => self.git.unstage_rename(item, origin).await,
                None => self.git.unstage(item).await,
            }
        } else {
            self.git.stage(item).await
        }
    }

    async fn remove(&self, item: &str) -> Result<()> {
        self.git.discard(item).await
    }
}

/// Source of the commit message
#[async_trait]
pub trait MessagePrompt: Send {
    /// `None` when the user cancelled
    async fn ask(&mut self) -> Result<Option<String>>;
}

/// Commit message prompt on the real terminal
pub struct TerminalPrompt {
    char_limit: usize,
}

impl TerminalPrompt {
    pub fn new(char_limit: usize) -> Self {
        Self { char_limit }
    }
}

#[async_trait]
impl MessagePrompt for TerminalPrompt {
    async fn ask(&mut self) -> Result<Option<String>> {
        let input = TextInput::new("Commit message:", self.char_limit).placeholder(MESSAGE_PLACEHOLDER);
        run_prompt(input).await
    }
}

/// Build the staging picker: changed files, with already-staged ones marked
pub async fn load_files<'a, R: GitRunner>(
    git: &'a Git<R>,
) -> Result<(StagingMode<'a, R>, PickerState)> {
    let entries = git.status().await?;
    if entries.is_empty() {
        return Err(Error::NothingChanged);
    }

    let mut files = Vec::with_capacity(entries.len());
    let mut renamed_from = HashMap::new();
    for entry in entries {
        if let Some(origin) = entry.origin {
            renamed_from.insert(entry.path.clone(), origin);
        }
        files.push(entry.path);
    }

    let staged = git.staged_files(&files).await?;
    debug!(
        "{} changed files, {} staged, {} renamed",
        files.len(),
        staged.len(),
        renamed_from.len()
    );

    let mode = StagingMode::new(git).with_renames(renamed_from);
    Ok((mode, PickerState::new(files).with_marked(staged)))
}

/// Act on the picker result
///
/// Only a confirm does anything: the marked files are copied to the
/// clipboard, a message is prompted for, then the index is committed and
/// (optionally) pushed.
pub async fn finish_files<R, P>(
    git: &Git<R>,
    state: &PickerState,
    clipboard: Option<&mut dyn ClipboardSink>,
    prompt: &mut P,
    push: bool,
) -> Result<()>
where
    R: GitRunner,
    P: MessagePrompt,
{
    if state.action() != Action::Confirm {
        debug!("Picker closed without commit ({:?})", state.action());
        return Ok(());
    }

    let marked = state.marked_items();
    if marked.is_empty() {
        return Err(Error::NothingToCommit);
    }

    if let Some(clipboard) = clipboard {
        clipboard.copy(&marked.join("\n"))?;
        info!("Copied {} staged paths to clipboard", marked.len());
    }

    let message = prompt.ask().await?.unwrap_or_default();
    let message = message.trim();
    if message.is_empty() {
        return Err(Error::EmptyCommitMessage);
    }

    commit_and_push(git, message, push).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::MemoryClipboard;
    use crate::git::FakeRunner;
    use crate::tui::Picker;
    use pretty_assertions::assert_eq;

    /// Answers with a fixed value and counts how often it was asked
    struct CannedPrompt {
        answer: Option<String>,
        asked: usize,
    }

    impl CannedPrompt {
        fn answering(answer: Option<&str>) -> Self {
            Self {
                answer: answer.map(String::from),
                asked: 0,
            }
        }
    }

    #[async_trait]
    impl MessagePrompt for CannedPrompt {
        async fn ask(&mut self) -> Result<Option<String>> {
            self.asked += 1;
            Ok(self.answer.clone())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn status_runner() -> FakeRunner {
        FakeRunner::new()
            .respond("status -u --porcelain -z", " M file.txt\0?? new.txt\0")
            .respond("diff --name-only --cached -z", "file.txt\0")
    }

    #[tokio::test]
    async fn test_load_files_marks_staged() {
        let git = Git::new(status_runner());
        let (_mode, state) = load_files(&git).await.unwrap();

        assert_eq!(state.items(), &["file.txt".to_string(), "new.txt".to_string()]);
        assert_eq!(state.marked_items(), vec!["file.txt"]);
    }

    #[tokio::test]
    async fn test_load_files_nothing_changed() {
        let git = Git::new(FakeRunner::new().respond("status -u --porcelain -z", ""));
        let result = load_files(&git).await;
        assert!(matches!(result, Err(Error::NothingChanged)));
        // No point asking for the staged diff
        assert_eq!(git.runner().calls(), vec!["status -u --porcelain -z"]);
    }

    #[tokio::test]
    async fn test_staging_keys_drive_git() {
        let git = Git::new(status_runner());
        let (mode, state) = load_files(&git).await.unwrap();
        let mut picker = Picker::new(mode, state);

        // Unstage file.txt, stage new.txt
        picker.handle_key(key(KeyCode::Enter)).await;
        picker.handle_key(key(KeyCode::Down)).await;
        picker.handle_key(key(KeyCode::Char(' '))).await;
        assert!(picker.handle_key(key(KeyCode::Char('c'))).await);

        let state = picker.into_state();
        assert_eq!(state.action(), Action::Confirm);
        assert_eq!(state.marked_items(), vec!["new.txt"]);
        assert_eq!(
            &git.runner().calls()[2..],
            &["restore --staged -- file.txt", "add -- new.txt"]
        );
    }

    #[tokio::test]
    async fn test_names_with_spaces_stage_verbatim() {
        let runner = FakeRunner::new()
            .respond("status -u --porcelain -z", "?? my notes.txt\0A  café.txt\0")
            .respond("diff --name-only --cached -z", "café.txt\0");
        let git = Git::new(runner);
        let (mode, state) = load_files(&git).await.unwrap();
        assert_eq!(state.marked_items(), vec!["café.txt"]);

        let mut picker = Picker::new(mode, state);
        picker.handle_key(key(KeyCode::Enter)).await;

        assert!(picker.state().is_marked("my notes.txt"));
        assert_eq!(git.runner().calls().last().map(String::as_str), Some("add -- my notes.txt"));
    }

    #[tokio::test]
    async fn test_unstaging_rename_restores_source() {
        let runner = FakeRunner::new()
            .respond("status -u --porcelain -z", "R  new.rs\0old.rs\0 M other.rs\0")
            .respond("diff --name-only --cached -z", "new.rs\0");
        let git = Git::new(runner);
        let (mode, state) = load_files(&git).await.unwrap();
        assert_eq!(state.items(), &["new.rs".to_string(), "other.rs".to_string()]);

        let mut picker = Picker::new(mode, state);
        picker.handle_key(key(KeyCode::Enter)).await;

        assert!(!picker.state().is_marked("new.rs"));
        assert_eq!(
            &git.runner().calls()[2..],
            &["restore --staged -- new.rs old.rs"]
        );
    }

    #[tokio::test]
    async fn test_discard_removes_row() {
        let git = Git::new(status_runner());
        let (mode, state) = load_files(&git).await.unwrap();
        let mut picker = Picker::new(mode, state);

        picker.handle_key(key(KeyCode::Char('d'))).await;

        assert_eq!(picker.state().items(), &["new.txt".to_string()]);
        assert_eq!(picker.state().marked_count(), 0);
        assert_eq!(
            &git.runner().calls()[2..],
            &["restore --staged -- file.txt", "restore -- file.txt"]
        );
    }

    #[tokio::test]
    async fn test_failed_stage_keeps_unmarked() {
        let runner = status_runner().fail("add -- new.txt", "permission denied");
        let git = Git::new(runner);
        let (mode, state) = load_files(&git).await.unwrap();
        let mut picker = Picker::new(mode, state);

        picker.handle_key(key(KeyCode::Down)).await;
        picker.handle_key(key(KeyCode::Enter)).await;

        assert!(!picker.state().is_marked("new.txt"));
    }

    #[tokio::test]
    async fn test_confirm_commits_and_pushes() {
        let git = Git::new(FakeRunner::new());
        let mut state = PickerState::new(vec!["a.rs".into(), "b.rs".into(), "c.rs".into()])
            .with_marked(["c.rs".to_string(), "a.rs".to_string()]);
        state.resolve(Action::Confirm);

        let mut clipboard = MemoryClipboard::default();
        let mut prompt = CannedPrompt::answering(Some("  add feature "));

        finish_files(&git, &state, Some(&mut clipboard), &mut prompt, true)
            .await
            .unwrap();

        assert_eq!(clipboard.copied, vec!["a.rs\nc.rs"]);
        assert_eq!(git.runner().calls(), vec!["commit -m add feature", "push"]);
    }

    #[tokio::test]
    async fn test_confirm_without_push() {
        let git = Git::new(FakeRunner::new());
        let mut state = PickerState::new(vec!["a.rs".into()]).with_marked(["a.rs".to_string()]);
        state.resolve(Action::Confirm);
        let mut prompt = CannedPrompt::answering(Some("msg"));

        finish_files(&git, &state, None, &mut prompt, false)
            .await
            .unwrap();

        assert_eq!(git.runner().calls(), vec!["commit -m msg"]);
    }

    #[tokio::test]
    async fn test_confirm_with_nothing_marked() {
        let git = Git::new(FakeRunner::new());
        let mut state = PickerState::new(vec!["a.rs".into()]);
        state.resolve(Action::Confirm);

        let mut clipboard = MemoryClipboard::default();
        let mut prompt = CannedPrompt::answering(Some("msg"));
        let err = finish_files(&git, &state, Some(&mut clipboard), &mut prompt, true)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NothingToCommit));
        assert!(git.runner().calls().is_empty());
        assert!(clipboard.copied.is_empty());
        assert_eq!(prompt.asked, 0);
    }

    #[tokio::test]
    async fn test_empty_or_cancelled_message() {
        let mut state = PickerState::new(vec!["a.rs".into()]).with_marked(["a.rs".to_string()]);
        state.resolve(Action::Confirm);

        for answer in [Some("   "), None] {
            let git = Git::new(FakeRunner::new());
            let mut prompt = CannedPrompt::answering(answer);
            let err = finish_files(&git, &state, None, &mut prompt, true)
                .await
                .unwrap_err();

            assert!(matches!(err, Error::EmptyCommitMessage));
            assert!(git.runner().calls().is_empty());
        }
    }

    #[tokio::test]
    async fn test_quit_never_commits() {
        let git = Git::new(FakeRunner::new());
        let mut state = PickerState::new(vec!["a.rs".into()]).with_marked(["a.rs".to_string()]);
        state.resolve(Action::None);

        let mut clipboard = MemoryClipboard::default();
        let mut prompt = CannedPrompt::answering(Some("msg"));
        finish_files(&git, &state, Some(&mut clipboard), &mut prompt, true)
            .await
            .unwrap();

        assert!(git.runner().calls().is_empty());
        assert!(clipboard.copied.is_empty());
        assert_eq!(prompt.asked, 0);
    }

    #[tokio::test]
    async fn test_clipboard_failure_is_reported() {
        let git = Git::new(FakeRunner::new());
        let mut state = PickerState::new(vec!["a.rs".into()]).with_marked(["a.rs".to_string()]);
        state.resolve(Action::Confirm);

        let mut clipboard = MemoryClipboard {
            broken: true,
            ..Default::default()
        };
        let mut prompt = CannedPrompt::answering(Some("msg"));
        let err = finish_files(&git, &state, Some(&mut clipboard), &mut prompt, true)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Clipboard(_)));
        assert!(git.runner().calls().is_empty());
    }
}
