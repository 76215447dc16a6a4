#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Whether `body` carries the light theme class.
    pub fn is_light(self) -> bool {
        self == Theme::Light
    }

    /// Icon shown on the theme toggle while this theme is active.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "fa-solid fa-moon",
            Theme::Dark => "fa-solid fa-sun",
        }
    }
}

pub const LIGHT_THEME_CLASS: &str = "light-theme";

/// Process-wide UI state. Owned by the page controller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    pub theme: Theme,
    pub active: Option<usize>,
    pub drawer_open: bool,
    pub query: String,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Returns true when the active section changed.
    pub fn set_active(&mut self, active: Option<usize>) -> bool {
        if self.active == active {
            return false;
        }
        self.active = active;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle() {
        let mut state = UiState::new();
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.toggle_theme(), Theme::Light);
        assert!(state.theme.is_light());
        assert_eq!(state.theme.toggle_icon(), "fa-solid fa-moon");
        assert_eq!(state.toggle_theme(), Theme::Dark);
        assert_eq!(state.theme.toggle_icon(), "fa-solid fa-sun");
    }

    #[test]
    fn test_set_active() {
        let mut state = UiState::new();
        assert!(state.set_active(Some(2)));
        assert!(!state.set_active(Some(2)));
        assert!(state.set_active(None));
        assert_eq!(state.active, None);
    }
}
