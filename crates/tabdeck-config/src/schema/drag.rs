use serde::{Deserialize, Serialize};

/// Drag-and-drop behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// When a tab is dropped on a row further down its own window, send the
    /// target index minus one so the tab lands in front of the target row.
    /// Off by default: the target row's index is sent unchanged.
    pub adjust_same_window_downward: bool,
}
