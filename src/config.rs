use serde::Deserialize;

/// Ids of the host document elements the page wires itself into.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub nav: String,
    pub content: String,
    pub search: String,
    pub theme_toggle: String,
    pub scroll_top: String,
    pub drawer: String,
    pub drawer_open: String,
    pub drawer_close: String,
    pub overlay: String,
    pub loader: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            nav: "categoryList".to_string(),
            content: "commandGrid".to_string(),
            search: "searchInput".to_string(),
            theme_toggle: "themeToggle".to_string(),
            scroll_top: "scrollTopBtn".to_string(),
            drawer: "sidebar".to_string(),
            drawer_open: "menuToggle".to_string(),
            drawer_close: "sidebarClose".to_string(),
            overlay: "sidebarOverlay".to_string(),
            loader: "loader".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub ids: ElementIds,
    /// CSS selector of the scroll progress bar.
    pub progress_selector: String,
    /// Offset past which the scroll-to-top control shows.
    pub scroll_top_threshold: f64,
    /// Sections activate this many pixels before their top reaches the viewport.
    pub activation_margin: f64,
    pub confirm_ms: i32,
    pub search_shortcut: String,
    /// Delay before the loading overlay is hidden.
    pub loader_delay_ms: i32,
    /// Visible fraction at which a section is revealed.
    pub reveal_threshold: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            progress_selector: ".scroll-bar".to_string(),
            scroll_top_threshold: 400.0,
            activation_margin: 200.0,
            confirm_ms: 2000,
            search_shortcut: "/".to_string(),
            loader_delay_ms: 1500,
            reveal_threshold: 0.1,
        }
    }
}

impl PageConfig {
    /// Overlay a JSON object on the defaults. Missing keys keep their default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = PageConfig::default();
        assert_eq!(cfg.ids.nav, "categoryList");
        assert_eq!(cfg.ids.content, "commandGrid");
        assert_eq!(cfg.scroll_top_threshold, 400.0);
        assert_eq!(cfg.activation_margin, 200.0);
        assert_eq!(cfg.confirm_ms, 2000);
    }

    #[test]
    fn test_loader_and_reveal_defaults() {
        let cfg = PageConfig::default();
        assert_eq!(cfg.ids.loader, "loader");
        assert_eq!(cfg.loader_delay_ms, 1500);
        assert_eq!(cfg.reveal_threshold, 0.1);

        let cfg = PageConfig::from_json(r#"{"loader_delay_ms": 0, "reveal_threshold": 0.5}"#).unwrap();
        assert_eq!(cfg.loader_delay_ms, 0);
        assert_eq!(cfg.reveal_threshold, 0.5);
        assert_eq!(cfg.ids.loader, "loader");
    }

    #[test]
    fn test_partial_override() {
        let cfg = PageConfig::from_json(r#"{"confirm_ms": 2500, "ids": {"search": "q"}}"#).unwrap();
        assert_eq!(cfg.confirm_ms, 2500);
        assert_eq!(cfg.ids.search, "q");
        assert_eq!(cfg.ids.nav, "categoryList");
        assert_eq!(cfg.progress_selector, ".scroll-bar");
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(PageConfig::from_json("  ").unwrap(), PageConfig::default());
        assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        assert!(PageConfig::from_json("{confirm_ms: }").is_err());
        assert!(PageConfig::from_json(r#"{"confirm_ms": "soon"}"#).is_err());
    }
}
