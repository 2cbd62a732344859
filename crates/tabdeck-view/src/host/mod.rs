//! The browser's tab/window API, as seen by the view.
//!
//! Every call is asynchronous: the caller passes a continuation and the host
//! invokes it exactly once, either before returning (in-memory host) or later
//! from the browser's event loop.

mod memory;

pub use memory::{HostCall, MemoryHost};

use tabdeck_common::{HostError, MoveIndex, TabId, Window, WindowId};

/// Continuation handed to a host call.
pub type Callback<T> = Box<dyn FnOnce(Result<T, HostError>)>;

/// Host-side tab and window management.
pub trait TabHost {
    /// All windows, each populated with its tabs in display order.
    fn get_all_windows(&self, done: Callback<Vec<Window>>);

    /// Relocate a tab. `index` is the tab's final position in `window_id`.
    fn move_tab(&self, tab_id: TabId, window_id: WindowId, index: MoveIndex, done: Callback<()>);

    fn remove_tab(&self, tab_id: TabId, done: Callback<()>);

    /// Make a tab the active one in its window.
    fn activate_tab(&self, tab_id: TabId, done: Callback<()>);

    /// Bring a window to the front.
    fn focus_window(&self, window_id: WindowId, done: Callback<()>);
}

/// A host call the view wants issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    Enumerate,
    Move {
        tab_id: TabId,
        window_id: WindowId,
        index: MoveIndex,
    },
    /// `window_id` is the row's window at the time of the click, used to
    /// drop the window header once its last row is gone.
    Remove { tab_id: TabId, window_id: WindowId },
    ActivateTab(TabId),
    FocusWindow(WindowId),
}

/// A host call's result, fed back into the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCompletion {
    Windows(Result<Vec<Window>, HostError>),
    Moved {
        tab_id: TabId,
        result: Result<(), HostError>,
    },
    Removed {
        tab_id: TabId,
        window_id: WindowId,
        result: Result<(), HostError>,
    },
    TabActivated {
        tab_id: TabId,
        result: Result<(), HostError>,
    },
    WindowFocused {
        window_id: WindowId,
        result: Result<(), HostError>,
    },
}

/// Issue a request against a host, wrapping its result as a [`HostCompletion`].
pub fn issue(host: &dyn TabHost, request: HostRequest, done: Box<dyn FnOnce(HostCompletion)>) {
    match request {
        HostRequest::Enumerate => {
            host.get_all_windows(Box::new(move |result| done(HostCompletion::Windows(result))))
        }
        HostRequest::Move {
            tab_id,
            window_id,
            index,
        } => host.move_tab(
            tab_id,
            window_id,
            index,
            Box::new(move |result| done(HostCompletion::Moved { tab_id, result })),
        ),
        HostRequest::Remove { tab_id, window_id } => host.remove_tab(
            tab_id,
            Box::new(move |result| {
                done(HostCompletion::Removed {
                    tab_id,
                    window_id,
                    result,
                })
            }),
        ),
        HostRequest::ActivateTab(tab_id) => host.activate_tab(
            tab_id,
            Box::new(move |result| done(HostCompletion::TabActivated { tab_id, result })),
        ),
        HostRequest::FocusWindow(window_id) => host.focus_window(
            window_id,
            Box::new(move |result| done(HostCompletion::WindowFocused { window_id, result })),
        ),
    }
}
