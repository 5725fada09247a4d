//! UI state and its reducer
//!
//! All shell-owned state lives in one struct and changes only through
//! explicit actions; click handlers collect actions during the frame and the
//! shell applies them afterwards.

use std::path::PathBuf;

use crate::catalog::ALL_CATEGORY;
use crate::models::{Channel, ViewMode};

#[derive(Debug, Clone)]
pub enum Action {
    SetSearch(String),
    SetCategory(String),
    SelectChannel(Channel),
    ClosePlayer,
    SetViewMode(ViewMode),
    ToggleSidebar,
    /// Log-only: no playlist is parsed or loaded
    UploadPlaylist(PathBuf),
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub search_term: String,
    pub selected_category: String,
    pub view_mode: ViewMode,
    pub active_channel: Option<Channel>,
    pub sidebar_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selected_category: ALL_CATEGORY.to_string(),
            view_mode: ViewMode::Grid,
            active_channel: None,
            sidebar_open: false,
        }
    }
}

impl UiState {
    /// Apply one action. Side effects (player lifecycle, logging) are the
    /// shell's job; this only performs the state transition.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetSearch(term) => self.search_term = term,
            Action::SetCategory(category) => {
                self.selected_category = category;
                // picking a category also dismisses the narrow-viewport sidebar
                self.sidebar_open = false;
            }
            Action::SelectChannel(channel) => self.active_channel = Some(channel),
            Action::ClosePlayer => self.active_channel = None,
            Action::SetViewMode(mode) => self.view_mode = mode,
            Action::ToggleSidebar => self.sidebar_open = !self.sidebar_open,
            Action::UploadPlaylist(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(id: &str) -> Channel {
        Channel {
            id: id.to_string(),
            name: format!("Channel {id}"),
            url: format!("http://example.com/{id}.ts"),
            logo: None,
            category: "News".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_defaults() {
        let state = UiState::default();
        assert_eq!(state.selected_category, ALL_CATEGORY);
        assert_eq!(state.view_mode, ViewMode::Grid);
        assert!(state.active_channel.is_none());
        assert!(!state.sidebar_open);
        assert!(state.search_term.is_empty());
    }

    #[test]
    fn test_set_search() {
        let mut state = UiState::default();
        state.apply(Action::SetSearch("news".to_string()));
        assert_eq!(state.search_term, "news");
    }

    #[test]
    fn test_set_category_closes_sidebar() {
        let mut state = UiState::default();
        state.apply(Action::ToggleSidebar);
        assert!(state.sidebar_open);
        state.apply(Action::SetCategory("Sports".to_string()));
        assert_eq!(state.selected_category, "Sports");
        assert!(!state.sidebar_open);
    }

    #[test]
    fn test_select_channel_replaces_active() {
        let mut state = UiState::default();
        state.apply(Action::SelectChannel(channel("1")));
        state.apply(Action::SelectChannel(channel("2")));
        // a single slot: the second selection discards the first
        assert_eq!(state.active_channel.as_ref().unwrap().id, "2");
    }

    #[test]
    fn test_close_player_returns_to_idle() {
        let mut state = UiState::default();
        state.apply(Action::SelectChannel(channel("1")));
        state.apply(Action::ClosePlayer);
        assert!(state.active_channel.is_none());
    }

    #[test]
    fn test_view_mode_toggle() {
        let mut state = UiState::default();
        state.apply(Action::SetViewMode(ViewMode::List));
        assert_eq!(state.view_mode, ViewMode::List);
        state.apply(Action::SetViewMode(ViewMode::Grid));
        assert_eq!(state.view_mode, ViewMode::Grid);
    }

    #[test]
    fn test_sidebar_toggle() {
        let mut state = UiState::default();
        state.apply(Action::ToggleSidebar);
        assert!(state.sidebar_open);
        state.apply(Action::ToggleSidebar);
        assert!(!state.sidebar_open);
    }

    #[test]
    fn test_upload_playlist_does_not_touch_state() {
        let mut state = UiState::default();
        state.apply(Action::SetSearch("kids".to_string()));
        let before = state.clone();
        state.apply(Action::UploadPlaylist(PathBuf::from("list.m3u")));
        assert_eq!(state.search_term, before.search_term);
        assert_eq!(state.selected_category, before.selected_category);
        assert!(state.active_channel.is_none());
    }
}
