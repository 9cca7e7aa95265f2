use crate::models::Notice;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// An explicit choice wins over the system preference.
    pub fn resolve(saved: Option<Theme>, prefers_dark: bool) -> Theme {
        match saved {
            Some(theme) => theme,
            None if prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }

    pub fn toggle(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Presentation state owned by the application and handed to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    saved_theme: Option<Theme>,
    chat_open: bool,
    flash: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiView {
    pub theme: Theme,
    pub saved_theme: Option<Theme>,
    pub chat_open: bool,
}

impl UiState {
    pub fn view(&self, prefers_dark: bool) -> UiView {
        UiView {
            theme: Theme::resolve(self.saved_theme, prefers_dark),
            saved_theme: self.saved_theme,
            chat_open: self.chat_open,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.saved_theme = Some(theme);
    }

    /// Flips whatever theme is currently showing and remembers the choice.
    pub fn toggle_theme(&mut self, prefers_dark: bool) -> Theme {
        let next = Theme::resolve(self.saved_theme, prefers_dark).toggle();
        self.saved_theme = Some(next);
        next
    }

    pub fn toggle_chat(&mut self) -> bool {
        self.chat_open = !self.chat_open;
        self.chat_open
    }

    /// Holds a notice for the next full page render.
    pub fn set_flash(&mut self, notice: Notice) {
        self.flash = Some(notice);
    }

    pub fn take_flash(&mut self) -> Option<Notice> {
        self.flash.take()
    }
}

/// Text for a count badge; `None` hides the badge.
pub fn badge_label(count: u64) -> Option<String> {
    match count {
        0 => None,
        1..=99 => Some(count.to_string()),
        _ => Some("99+".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_theme_wins_over_system() {
        assert_eq!(Theme::resolve(Some(Theme::Light), true), Theme::Light);
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
    }

    #[test]
    fn toggle_starts_from_displayed_theme() {
        let mut ui = UiState::default();
        assert_eq!(ui.toggle_theme(true), Theme::Light);
        assert_eq!(ui.view(true).saved_theme, Some(Theme::Light));
        assert_eq!(ui.toggle_theme(true), Theme::Dark);
        assert_eq!(ui.view(false).theme, Theme::Dark);
    }

    #[test]
    fn chat_flag_toggles() {
        let mut ui = UiState::default();
        assert!(ui.toggle_chat());
        assert!(ui.view(false).chat_open);
        assert!(!ui.toggle_chat());
    }

    #[test]
    fn flash_is_shown_once() {
        let mut ui = UiState::default();
        assert_eq!(ui.take_flash(), None);

        ui.set_flash(Notice::warning("Sorry, only 2 items available in stock."));
        let notice = ui.take_flash().expect("flash notice");
        assert_eq!(notice.message, "Sorry, only 2 items available in stock.");
        assert_eq!(ui.take_flash(), None);
    }

    #[test]
    fn badge_label_caps_at_ninety_nine() {
        assert_eq!(badge_label(0), None);
        assert_eq!(badge_label(7).as_deref(), Some("7"));
        assert_eq!(badge_label(99).as_deref(), Some("99"));
        assert_eq!(badge_label(100).as_deref(), Some("99+"));
    }
}
