//! Drag session state and drop destination resolution.
//!
//! One drag gesture at a time. The session records where the dragged tab
//! came from and which row or header currently shows a drop indicator.

use tabdeck_common::{MoveIndex, TabId, WindowId};
use tabdeck_config::DragConfig;
use tracing::debug;

use crate::surface::RowMeta;

// =============================================================================
// TYPES
// =============================================================================

/// State of the drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// The tab being dragged.
    pub tab_id: TabId,
    /// Its window when the drag started.
    pub source_window: WindowId,
    /// Its display index when the drag started.
    pub source_index: u32,
    /// Row currently marked as the drop target.
    pub row_indicator: Option<TabId>,
    /// Header currently marked as the drop target.
    pub header_indicator: Option<WindowId>,
}

impl DragSession {
    pub fn start(source: RowMeta) -> Self {
        Self {
            tab_id: source.tab_id,
            source_window: source.window_id,
            source_index: source.index,
            row_indicator: None,
            header_indicator: None,
        }
    }

    pub fn is_dragging(&self, tab_id: TabId) -> bool {
        self.tab_id == tab_id
    }
}

/// Where a drop sends the dragged tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub tab_id: TabId,
    pub window_id: WindowId,
    pub index: MoveIndex,
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Destination for a drop on a row, or `None` when the row is the dragged tab.
///
/// The row's render-time index is sent unchanged unless
/// `adjust_same_window_downward` is set, in which case a downward move inside
/// the source window sends one less.
pub fn row_destination(
    session: &DragSession,
    target: RowMeta,
    config: &DragConfig,
) -> Option<Destination> {
    if session.is_dragging(target.tab_id) {
        return None;
    }

    let mut index = target.index;
    if let Some(adjusted) = downward_adjustment(session, target) {
        debug!(
            tab_id = %session.tab_id,
            target_index = target.index,
            adjusted,
            applied = config.adjust_same_window_downward,
            "same-window downward move"
        );
        if config.adjust_same_window_downward {
            index = adjusted;
        }
    }

    Some(Destination {
        tab_id: session.tab_id,
        window_id: target.window_id,
        index: MoveIndex::At(index),
    })
}

/// Destination for a drop on a window header: always the end of that window.
pub fn header_destination(session: &DragSession, window_id: WindowId) -> Destination {
    Destination {
        tab_id: session.tab_id,
        window_id,
        index: MoveIndex::Append,
    }
}

/// `target - 1` when the drop lands further down the source window.
fn downward_adjustment(session: &DragSession, target: RowMeta) -> Option<u32> {
    (target.window_id == session.source_window && session.source_index < target.index)
        .then(|| target.index - 1)
}

// =============================================================================
// TESTS
// =============================================================================
