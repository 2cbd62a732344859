//! The tab list view.
//!
//! Renders a snapshot of every window and its tabs onto a [`Surface`] and
//! turns gestures into [`HostRequest`]s. The view never talks to the host
//! itself: requests queue up until the driver drains them with
//! [`TabListView::take_requests`], and results come back through
//! [`TabListView::complete`].
//!
//! Every mutation is followed by a full re-render from a fresh snapshot.
//! The one exception is closing a tab, which detaches the row (and an
//! emptied window's header) locally.

mod gestures;

#[cfg(test)]
mod tests;

use tabdeck_common::{HostError, SurfaceError, Tab, TabDeckError, Window, WindowId};
use tabdeck_config::{DragConfig, PopupConfig, ViewConfig};
use tracing::{debug, info, warn};

use crate::drag::DragSession;
use crate::host::{HostCompletion, HostRequest};
use crate::surface::{HeaderSpec, RowSpec, Surface};

pub struct TabListView<S> {
    surface: S,
    view: ViewConfig,
    drag_config: DragConfig,
    drag: Option<DragSession>,
    pending: Vec<HostRequest>,
}

impl<S: Surface> TabListView<S> {
    pub fn new(surface: S, config: &PopupConfig) -> Self {
        Self {
            surface,
            view: config.view.clone(),
            drag_config: config.drag,
            drag: None,
            pending: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Requests queued since the last drain, in the order they were made.
    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    // =========================================================================
    // RENDER
    // =========================================================================

    /// Clear the list and ask the host for a fresh snapshot.
    pub fn render(&mut self) -> Result<(), SurfaceError> {
        debug!("render requested");
        self.pending.push(HostRequest::Enumerate);
        self.surface.clear()
    }

    /// Rebuild the whole list from a snapshot. Windows without tabs are skipped
    /// but still count towards the header position.
    fn rebuild(&mut self, windows: &[Window]) -> Result<(), SurfaceError> {
        self.surface.clear()?;

        let mut rows = 0usize;
        for (position, window) in windows.iter().enumerate() {
            if !window.has_tabs() {
                continue;
            }
            self.surface.append_header(&HeaderSpec {
                window_id: window.id,
                label: self.view.header_text(position + 1),
            })?;
            for (index, tab) in window.tabs.iter().enumerate() {
                let row = self.row_spec(window.id, index as u32, tab);
                self.surface.append_row(&row)?;
                rows += 1;
            }
        }

        info!(windows = windows.len(), rows, "rendered tab list");
        Ok(())
    }

    fn row_spec(&self, window_id: WindowId, index: u32, tab: &Tab) -> RowSpec {
        RowSpec {
            tab_id: tab.id,
            window_id,
            index,
            label: tab.label().to_string(),
            icon_url: tab.icon().map(str::to_string),
            icon_size_px: self.view.icon_size_px,
            close_label: self.view.close_label.clone(),
            active: tab.active,
        }
    }

    // =========================================================================
    // HOST COMPLETIONS
    // =========================================================================

    /// Apply a host call's result.
    ///
    /// Only a failed enumeration is returned as an error. Failed mutations are
    /// logged and otherwise treated like successes: a move still re-renders
    /// and a close still patches the list.
    pub fn complete(&mut self, completion: HostCompletion) -> Result<(), TabDeckError> {
        match completion {
            HostCompletion::Windows(result) => {
                let windows = result?;
                self.rebuild(&windows)?;
            }
            HostCompletion::Moved { tab_id, result } => {
                if let Err(e) = result {
                    warn_ignored(&e);
                }
                debug!(tab_id = %tab_id, "move finished, re-rendering");
                self.render()?;
            }
            HostCompletion::Removed {
                tab_id,
                window_id,
                result,
            } => {
                if let Err(e) = result {
                    warn_ignored(&e);
                }
                if !self.surface.remove_row(tab_id)? {
                    debug!(tab_id = %tab_id, "row already detached");
                }
                if self.surface.row_count(window_id) == 0 {
                    debug!(window_id = %window_id, "window emptied, removing header");
                    self.surface.remove_header(window_id)?;
                }
            }
            HostCompletion::TabActivated { result, .. }
            | HostCompletion::WindowFocused { result, .. } => {
                if let Err(e) = result {
                    warn_ignored(&e);
                }
            }
        }
        Ok(())
    }
}

fn warn_ignored(error: &HostError) {
    warn!(error = %error, "host call failed, continuing");
}
