//! Gesture handling: row clicks, close buttons, and the drag state machine.

use tabdeck_common::{SurfaceError, TabId, WindowId};
use tracing::debug;

use super::TabListView;
use crate::drag::{self, Destination, DragSession};
use crate::gesture::Gesture;
use crate::host::HostRequest;
use crate::surface::{Highlight, Surface};

impl<S: Surface> TabListView<S> {
    /// Apply one gesture. Host calls it needs are queued, not issued.
    pub fn handle(&mut self, gesture: Gesture) -> Result<(), SurfaceError> {
        match gesture {
            Gesture::Activate(tab_id) => self.activate(tab_id),
            Gesture::Close(tab_id) => self.close(tab_id),
            Gesture::DragStart(tab_id) => self.drag_start(tab_id)?,
            Gesture::DragOver(target) => self.drag_over(target)?,
            Gesture::DragLeave(tab_id) => self.drag_leave(tab_id)?,
            Gesture::Drop(target) => self.drop_on_row(target)?,
            Gesture::HeaderDragOver(window_id) => self.header_drag_over(window_id)?,
            Gesture::HeaderDragLeave(window_id) => self.header_drag_leave(window_id)?,
            Gesture::HeaderDrop(window_id) => self.drop_on_header(window_id)?,
            Gesture::DragEnd => self.drag_end()?,
        }
        Ok(())
    }

    // =========================================================================
    // ROW CLICKS
    // =========================================================================

    fn activate(&mut self, tab_id: TabId) {
        let Some(row) = self.surface.row(tab_id) else {
            debug!(tab_id = %tab_id, "click on unknown row");
            return;
        };
        debug!(tab_id = %tab_id, window_id = %row.window_id, "switching to tab");
        self.pending.push(HostRequest::FocusWindow(row.window_id));
        self.pending.push(HostRequest::ActivateTab(tab_id));
    }

    fn close(&mut self, tab_id: TabId) {
        let Some(row) = self.surface.row(tab_id) else {
            debug!(tab_id = %tab_id, "close on unknown row");
            return;
        };
        debug!(tab_id = %tab_id, window_id = %row.window_id, "closing tab");
        self.pending.push(HostRequest::Remove {
            tab_id,
            window_id: row.window_id,
        });
    }

    // =========================================================================
    // DRAG: ROWS
    // =========================================================================

    fn drag_start(&mut self, tab_id: TabId) -> Result<(), SurfaceError> {
        let Some(row) = self.surface.row(tab_id) else {
            debug!(tab_id = %tab_id, "drag start on unknown row");
            return Ok(());
        };
        debug!(tab_id = %tab_id, window_id = %row.window_id, "drag start");
        self.drag = Some(DragSession::start(row));
        self.surface
            .set_row_highlight(tab_id, Highlight::Dragging, true)
    }

    fn drag_over(&mut self, target: Option<TabId>) -> Result<(), SurfaceError> {
        let Some(session) = self.drag.as_mut() else {
            return Ok(());
        };
        let candidate = target.filter(|&t| !session.is_dragging(t));
        if session.row_indicator == candidate {
            return Ok(());
        }

        session.row_indicator = candidate;
        self.surface.clear_highlight(Highlight::DropTarget)?;
        if let Some(tab_id) = candidate {
            self.surface
                .set_row_highlight(tab_id, Highlight::DropTarget, true)?;
        }
        Ok(())
    }

    fn drag_leave(&mut self, tab_id: TabId) -> Result<(), SurfaceError> {
        if let Some(session) = self.drag.as_mut() {
            if session.row_indicator == Some(tab_id) {
                session.row_indicator = None;
            }
        }
        self.surface
            .set_row_highlight(tab_id, Highlight::DropTarget, false)
    }

    fn drop_on_row(&mut self, target: Option<TabId>) -> Result<(), SurfaceError> {
        self.surface.clear_highlight(Highlight::DropTarget)?;
        let Some(session) = self.drag.as_mut() else {
            return Ok(());
        };
        session.row_indicator = None;

        let Some(target) = target.and_then(|t| self.surface.row(t)) else {
            return Ok(());
        };
        match drag::row_destination(session, target, &self.drag_config) {
            Some(dest) => self.request_move(dest),
            None => debug!(tab_id = %target.tab_id, "dropped on itself"),
        }
        Ok(())
    }

    // =========================================================================
    // DRAG: WINDOW HEADERS
    // =========================================================================

    fn header_drag_over(&mut self, window_id: WindowId) -> Result<(), SurfaceError> {
        let Some(session) = self.drag.as_mut() else {
            return Ok(());
        };
        // A row indicator wins over the header.
        if session.row_indicator.is_some() || session.header_indicator == Some(window_id) {
            return Ok(());
        }

        session.header_indicator = Some(window_id);
        self.surface.clear_highlight(Highlight::WindowDropTarget)?;
        self.surface
            .set_header_highlight(window_id, Highlight::WindowDropTarget, true)
    }

    fn header_drag_leave(&mut self, window_id: WindowId) -> Result<(), SurfaceError> {
        if let Some(session) = self.drag.as_mut() {
            if session.header_indicator == Some(window_id) {
                session.header_indicator = None;
            }
        }
        self.surface
            .set_header_highlight(window_id, Highlight::WindowDropTarget, false)
    }

    fn drop_on_header(&mut self, window_id: WindowId) -> Result<(), SurfaceError> {
        self.surface
            .set_header_highlight(window_id, Highlight::WindowDropTarget, false)?;
        let Some(session) = self.drag.as_mut() else {
            return Ok(());
        };
        session.header_indicator = None;
        if session.row_indicator.is_some() {
            debug!(window_id = %window_id, "header drop ignored, row indicator active");
            return Ok(());
        }

        let dest = drag::header_destination(session, window_id);
        self.request_move(dest);
        Ok(())
    }

    // =========================================================================
    // DRAG: END
    // =========================================================================

    /// Clears every drag visual and the session, whether or not a drop happened.
    fn drag_end(&mut self) -> Result<(), SurfaceError> {
        for highlight in Highlight::ALL {
            self.surface.clear_highlight(highlight)?;
        }
        if let Some(session) = self.drag.take() {
            debug!(tab_id = %session.tab_id, "drag end");
        }
        Ok(())
    }

    /// Queue a move and close the session; the re-render follows the host's answer.
    fn request_move(&mut self, dest: Destination) {
        debug!(
            tab_id = %dest.tab_id,
            window_id = %dest.window_id,
            index = dest.index.to_host(),
            "moving tab"
        );
        self.pending.push(HostRequest::Move {
            tab_id: dest.tab_id,
            window_id: dest.window_id,
            index: dest.index,
        });
        self.drag = None;
    }
}
