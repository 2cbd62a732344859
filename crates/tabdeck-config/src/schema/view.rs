use serde::{Deserialize, Serialize};

/// Placeholder replaced by the window's 1-based position.
pub const POSITION_PLACEHOLDER: &str = "{n}";

/// How the tab list is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Id of the element the list is rendered into.
    pub container_id: String,
    /// Window header text; `{n}` is the window's position.
    pub header_label: String,
    /// Favicon width and height in pixels.
    pub icon_size_px: u32,
    /// Text of the close button on each row.
    pub close_label: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            container_id: "tabs".into(),
            header_label: "Window {n}".into(),
            icon_size_px: 16,
            close_label: "X".into(),
        }
    }
}

impl ViewConfig {
    pub fn header_text(&self, position: usize) -> String {
        self.header_label
            .replace(POSITION_PLACEHOLDER, &position.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_text_substitutes_position() {
        let view = ViewConfig::default();
        assert_eq!(view.header_text(1), "Window 1");
        assert_eq!(view.header_text(12), "Window 12");
    }

    #[test]
    fn custom_header_template() {
        let view = ViewConfig {
            header_label: "#{n} ({n})".into(),
            ..Default::default()
        };
        assert_eq!(view.header_text(3), "#3 (3)");
    }
}
