//! Session management
//!
//! A session is a named stash. The picker lists them most recent first;
//! Enter restores the selected one, `-` drops it.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::error::{Error, Result};
use crate::git::{Git, GitRunner};
use crate::tui::{Action, PickerMode, PickerState};

/// Session picker: pure selection, no side effects while browsing
pub struct SessionMode;

#[async_trait]
impl PickerMode for SessionMode {
    fn title(&self) -> &str {
        "What session do you want to activate/delete?"
    }

    fn key_hints(&self) -> &[(&'static str, &'static str)] {
        &[("enter", "activate"), ("-", "delete"), ("q", "quit")]
    }

    fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => {
                Some(Action::Activate)
            }
            (KeyCode::Char('-'), _) => Some(Action::Delete),
            _ => None,
        }
    }
}

/// Build the session picker state from the stash list
pub async fn load_sessions<R: GitRunner>(git: &Git<R>) -> Result<PickerState> {
    let sessions = git.sessions().await?;
    if sessions.is_empty() {
        return Err(Error::NoSessions);
    }

    debug!("{} saved sessions", sessions.len());
    Ok(PickerState::new(sessions))
}

/// Restore or drop the session chosen in the picker
pub async fn finish_sessions<R: GitRunner>(git: &Git<R>, state: &PickerState) -> Result<()> {
    match (state.action(), state.selected()) {
        (Action::Activate, Some(index)) => git.pop_session(index).await,
        (Action::Delete, Some(index)) => git.drop_session(index).await,
        (action, _) => {
            debug!("No session action ({:?})", action);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::FakeRunner;
    use crate::tui::Picker;
    use pretty_assertions::assert_eq;

    const STASHES: &str = "stash@{0}: WIP on main\nstash@{1}: on main: foo\n";

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn pick(keys: &[KeyCode]) -> (Git<FakeRunner>, PickerState) {
        let git = Git::new(FakeRunner::new().respond("stash list", STASHES));
        let state = load_sessions(&git).await.unwrap();
        let mut picker = Picker::new(SessionMode, state);

        for code in keys {
            if picker.handle_key(key(*code)).await {
                break;
            }
        }

        let state = picker.into_state();
        (git, state)
    }

    #[tokio::test]
    async fn test_load_sessions() {
        let git = Git::new(FakeRunner::new().respond("stash list", STASHES));
        let state = load_sessions(&git).await.unwrap();
        assert_eq!(
            state.items(),
            &[
                "stash@{0}: WIP on main".to_string(),
                "stash@{1}: on main: foo".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_no_sessions() {
        let git = Git::new(FakeRunner::new());
        let err = load_sessions(&git).await.unwrap_err();
        assert!(matches!(err, Error::NoSessions));
    }

    #[tokio::test]
    async fn test_activate_pops_selected() {
        let (git, state) = pick(&[KeyCode::Down, KeyCode::Enter]).await;
        assert_eq!(state.action(), Action::Activate);
        assert_eq!(state.selected(), Some(1));

        finish_sessions(&git, &state).await.unwrap();
        assert_eq!(git.runner().calls(), vec!["stash list", "stash pop --index 1"]);
    }

    #[tokio::test]
    async fn test_delete_drops_selected() {
        let (git, state) = pick(&[KeyCode::Char('-')]).await;
        assert_eq!(state.action(), Action::Delete);

        finish_sessions(&git, &state).await.unwrap();
        assert_eq!(git.runner().calls(), vec!["stash list", "stash drop 0"]);
    }

    #[tokio::test]
    async fn test_quit_does_nothing() {
        let (git, state) = pick(&[KeyCode::Down, KeyCode::Char('q'), KeyCode::Enter]).await;
        assert_eq!(state.action(), Action::None);

        finish_sessions(&git, &state).await.unwrap();
        assert_eq!(git.runner().calls(), vec!["stash list"]);
    }

    #[tokio::test]
    async fn test_staging_keys_are_not_bound() {
        let (_git, state) = pick(&[KeyCode::Char('d'), KeyCode::Char('c')]).await;
        assert_eq!(state.action(), Action::None);
        assert_eq!(state.len(), 2);
    }
}
