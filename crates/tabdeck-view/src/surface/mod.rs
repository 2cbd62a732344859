//! The rendered tree the view writes into.
//!
//! A surface is a flat, ordered list of window headers and tab rows under
//! one container. Rows carry their tab id, window id and display index as
//! data attributes; the drag handlers read them back through [`Surface::row`].

mod memory;

pub use memory::{MemorySurface, Node, Removal};

use tabdeck_common::{SurfaceError, TabId, WindowId};

// =============================================================================
// DOM CONTRACT
// =============================================================================

/// Class of a window header element.
pub const HEADER_CLASS: &str = "window-header";
/// Class of a tab row element.
pub const ROW_CLASS: &str = "tab-item";
/// Class of the title span inside a row.
pub const TITLE_CLASS: &str = "tab-title";
/// Class of the close button inside a row.
pub const CLOSE_CLASS: &str = "tab-close";
/// Class marking the active tab of a window.
pub const ACTIVE_CLASS: &str = "active-tab";

/// Data attribute holding a tab id.
pub const ATTR_TAB_ID: &str = "data-tab-id";
/// Data attribute holding a window id.
pub const ATTR_WINDOW_ID: &str = "data-window-id";
/// Data attribute holding a row's display index.
pub const ATTR_INDEX: &str = "data-index";

/// Transient visual states toggled during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// The row being dragged.
    Dragging,
    /// The row a drop would land on.
    DropTarget,
    /// The window header a drop would append to.
    WindowDropTarget,
}

impl Highlight {
    pub const ALL: [Highlight; 3] = [
        Highlight::Dragging,
        Highlight::DropTarget,
        Highlight::WindowDropTarget,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            Highlight::Dragging => "dragging",
            Highlight::DropTarget => "drop-target",
            Highlight::WindowDropTarget => "window-drop-target",
        }
    }
}

// =============================================================================
// NODE SPECS
// =============================================================================

/// Everything needed to build one window header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
    pub window_id: WindowId,
    pub label: String,
}

/// Everything needed to build one tab row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpec {
    pub tab_id: TabId,
    pub window_id: WindowId,
    pub index: u32,
    pub label: String,
    pub icon_url: Option<String>,
    pub icon_size_px: u32,
    pub close_label: String,
    pub active: bool,
}

impl RowSpec {
    pub fn meta(&self) -> RowMeta {
        RowMeta {
            tab_id: self.tab_id,
            window_id: self.window_id,
            index: self.index,
        }
    }
}

/// Identity attributes read back from a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMeta {
    pub tab_id: TabId,
    pub window_id: WindowId,
    pub index: u32,
}

// =============================================================================
// SURFACE TRAIT
// =============================================================================

/// A container the tab list is rendered into.
///
/// Implemented by the browser DOM and by [`MemorySurface`] for tests.
pub trait Surface {
    /// Remove every header and row.
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Append a window header after the last node.
    fn append_header(&mut self, header: &HeaderSpec) -> Result<(), SurfaceError>;

    /// Append a tab row after the last node. Rows are always draggable.
    fn append_row(&mut self, row: &RowSpec) -> Result<(), SurfaceError>;

    /// Read a row's attributes back, if the row is attached.
    fn row(&self, tab_id: TabId) -> Option<RowMeta>;

    /// Detach a row. Returns `false` if it was not attached.
    fn remove_row(&mut self, tab_id: TabId) -> Result<bool, SurfaceError>;

    /// Number of attached rows belonging to a window.
    fn row_count(&self, window_id: WindowId) -> usize;

    /// Detach a window header. Returns `false` if it was not attached.
    fn remove_header(&mut self, window_id: WindowId) -> Result<bool, SurfaceError>;

    /// Toggle a highlight on one row.
    fn set_row_highlight(
        &mut self,
        tab_id: TabId,
        highlight: Highlight,
        on: bool,
    ) -> Result<(), SurfaceError>;

    /// Toggle a highlight on one window header.
    fn set_header_highlight(
        &mut self,
        window_id: WindowId,
        highlight: Highlight,
        on: bool,
    ) -> Result<(), SurfaceError>;

    /// Remove a highlight from every node that carries it.
    fn clear_highlight(&mut self, highlight: Highlight) -> Result<(), SurfaceError>;
}
