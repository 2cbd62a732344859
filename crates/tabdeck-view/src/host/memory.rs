//! In-memory host with the browser's move/remove semantics.
//!
//! Used by tests and as the popup's host when the extension API is missing
//! (for example when `popup.html` is opened as a plain page).

use std::cell::RefCell;

use tabdeck_common::{HostError, MoveIndex, Tab, TabId, Window, WindowId};
use tracing::debug;

use super::{Callback, TabHost};

/// A call the host received, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    GetAll,
    Move {
        tab_id: TabId,
        window_id: WindowId,
        index: MoveIndex,
    },
    Remove(TabId),
    ActivateTab(TabId),
    FocusWindow(WindowId),
}

#[derive(Debug, Default)]
struct HostState {
    windows: Vec<Window>,
    calls: Vec<HostCall>,
    focused: Option<WindowId>,
    fail_next: Option<String>,
}

/// Owns a list of windows and mutates it the way the browser would.
#[derive(Debug, Default)]
pub struct MemoryHost {
    state: RefCell<HostState>,
}

impl MemoryHost {
    pub fn new(windows: Vec<Window>) -> Self {
        let host = Self {
            state: RefCell::new(HostState {
                windows,
                ..Default::default()
            }),
        };
        host.state.borrow_mut().reindex();
        host
    }

    /// Build windows from `(window id, [tab ids])` pairs.
    ///
    /// Tabs are titled `Tab <id>` with a matching example URL; the first tab
    /// of each window is active.
    pub fn from_layout(layout: &[(i32, &[i32])]) -> Self {
        let windows = layout
            .iter()
            .map(|&(window, tabs)| Window {
                id: WindowId(window),
                tabs: tabs
                    .iter()
                    .enumerate()
                    .map(|(i, &tab)| Tab {
                        id: TabId(tab),
                        window_id: WindowId(window),
                        index: 0,
                        title: format!("Tab {tab}"),
                        url: format!("https://example.com/{tab}"),
                        fav_icon_url: None,
                        active: i == 0,
                    })
                    .collect(),
            })
            .collect();
        Self::new(windows)
    }

    /// Parse a `windows.getAll({populate: true})` style JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, HostError> {
        let windows: Vec<Window> = serde_json::from_str(json)?;
        Ok(Self::new(windows))
    }

    /// Make the next call fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.state.borrow_mut().fail_next = Some(message.into());
    }

    pub fn windows(&self) -> Vec<Window> {
        self.state.borrow().windows.clone()
    }

    /// Tab ids of one window in display order.
    pub fn tab_ids(&self, window_id: WindowId) -> Vec<TabId> {
        self.state
            .borrow()
            .windows
            .iter()
            .find(|w| w.id == window_id)
            .map(Window::tab_ids)
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state.borrow().calls.clone()
    }

    /// Calls that change host state.
    pub fn mutations(&self) -> Vec<HostCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, HostCall::Move { .. } | HostCall::Remove(_)))
            .collect()
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.state.borrow().focused
    }

    pub fn active_tab(&self, window_id: WindowId) -> Option<TabId> {
        self.state
            .borrow()
            .windows
            .iter()
            .find(|w| w.id == window_id)
            .and_then(|w| w.tabs.iter().find(|t| t.active))
            .map(|t| t.id)
    }

    /// Record a call and apply it. The state borrow is released before the
    /// continuation runs, so continuations may call back into the host.
    fn run<T>(
        &self,
        call: HostCall,
        apply: impl FnOnce(&mut HostState) -> Result<T, String>,
        wrap: fn(String) -> HostError,
        done: Callback<T>,
    ) {
        let result = {
            let mut state = self.state.borrow_mut();
            state.calls.push(call);
            match state.fail_next.take() {
                Some(message) => Err(message),
                None => apply(&mut *state),
            }
        };
        debug!(?call, ok = result.is_ok(), "memory host call");
        done(result.map_err(wrap));
    }
}

impl HostState {
    fn reindex(&mut self) {
        for window in &mut self.windows {
            for (i, tab) in window.tabs.iter_mut().enumerate() {
                tab.index = i as u32;
                tab.window_id = window.id;
            }
        }
    }

    fn take_tab(&mut self, tab_id: TabId) -> Option<Tab> {
        self.windows.iter_mut().find_map(|w| {
            let pos = w.tabs.iter().position(|t| t.id == tab_id)?;
            Some(w.tabs.remove(pos))
        })
    }

    fn has_tab(&self, tab_id: TabId) -> bool {
        self.windows
            .iter()
            .any(|w| w.tabs.iter().any(|t| t.id == tab_id))
    }

    fn move_tab(&mut self, tab_id: TabId, window_id: WindowId, index: MoveIndex) -> Result<(), String> {
        if !self.has_tab(tab_id) {
            return Err(no_tab(tab_id));
        }
        if !self.windows.iter().any(|w| w.id == window_id) {
            return Err(format!("No window with id: {window_id}."));
        }
        let mut tab = self.take_tab(tab_id).ok_or_else(|| no_tab(tab_id))?;
        let dest = self
            .windows
            .iter_mut()
            .find(|w| w.id == window_id)
            .ok_or_else(|| format!("No window with id: {window_id}."))?;
        // A moved tab never stays active in its new window unless it was alone.
        if dest.tabs.iter().any(|t| t.active) {
            tab.active = false;
        }
        let at = match index {
            MoveIndex::At(n) => (n as usize).min(dest.tabs.len()),
            MoveIndex::Append => dest.tabs.len(),
        };
        dest.tabs.insert(at, tab);
        self.reindex();
        Ok(())
    }

    fn remove_tab(&mut self, tab_id: TabId) -> Result<(), String> {
        self.take_tab(tab_id).ok_or_else(|| no_tab(tab_id))?;
        self.reindex();
        Ok(())
    }

    fn activate_tab(&mut self, tab_id: TabId) -> Result<(), String> {
        let window = self
            .windows
            .iter_mut()
            .find(|w| w.tabs.iter().any(|t| t.id == tab_id))
            .ok_or_else(|| no_tab(tab_id))?;
        for tab in &mut window.tabs {
            tab.active = tab.id == tab_id;
        }
        Ok(())
    }

    fn focus_window(&mut self, window_id: WindowId) -> Result<(), String> {
        if !self.windows.iter().any(|w| w.id == window_id) {
            return Err(format!("No window with id: {window_id}."));
        }
        self.focused = Some(window_id);
        Ok(())
    }
}

fn no_tab(tab_id: TabId) -> String {
    format!("No tab with id: {tab_id}.")
}

impl TabHost for MemoryHost {
    fn get_all_windows(&self, done: Callback<Vec<Window>>) {
        self.run(
            HostCall::GetAll,
            |state| Ok(state.windows.clone()),
            HostError::Enumerate,
            done,
        );
    }

    fn move_tab(&self, tab_id: TabId, window_id: WindowId, index: MoveIndex, done: Callback<()>) {
        self.run(
            HostCall::Move {
                tab_id,
                window_id,
                index,
            },
            |state| state.move_tab(tab_id, window_id, index),
            HostError::Move,
            done,
        );
    }

    fn remove_tab(&self, tab_id: TabId, done: Callback<()>) {
        self.run(
            HostCall::Remove(tab_id),
            |state| state.remove_tab(tab_id),
            HostError::Remove,
            done,
        );
    }

    fn activate_tab(&self, tab_id: TabId, done: Callback<()>) {
        self.run(
            HostCall::ActivateTab(tab_id),
            |state| state.activate_tab(tab_id),
            HostError::UpdateTab,
            done,
        );
    }

    fn focus_window(&self, window_id: WindowId, done: Callback<()>) {
        self.run(
            HostCall::FocusWindow(window_id),
            |state| state.focus_window(window_id),
            HostError::UpdateWindow,
            done,
        );
    }
}
