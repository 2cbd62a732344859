//! User gestures and how raw DOM events map onto them.
//!
//! The web layer listens on the container once, resolves each event's target
//! to a [`PointerTarget`], and turns `(event kind, target)` into a [`Gesture`]
//! with [`gesture_for`].

use tabdeck_common::{TabId, WindowId};

/// Everything the user can do in the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    // -- Rows --
    /// Click on a row: switch to that tab.
    Activate(TabId),
    /// Click on a row's close button.
    Close(TabId),

    // -- Drag and drop --
    DragStart(TabId),
    /// Drag over a row, or over empty space (`None`).
    DragOver(Option<TabId>),
    DragLeave(TabId),
    /// Drop on a row, or on empty space (`None`).
    Drop(Option<TabId>),
    HeaderDragOver(WindowId),
    HeaderDragLeave(WindowId),
    HeaderDrop(WindowId),
    DragEnd,
}

/// DOM events the popup listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventKind {
    Click,
    DragStart,
    DragOver,
    DragLeave,
    Drop,
    DragEnd,
}

impl DomEventKind {
    pub const ALL: [DomEventKind; 6] = [
        DomEventKind::Click,
        DomEventKind::DragStart,
        DomEventKind::DragOver,
        DomEventKind::DragLeave,
        DomEventKind::Drop,
        DomEventKind::DragEnd,
    ];

    /// Name passed to `addEventListener`.
    pub fn event_type(self) -> &'static str {
        match self {
            DomEventKind::Click => "click",
            DomEventKind::DragStart => "dragstart",
            DomEventKind::DragOver => "dragover",
            DomEventKind::DragLeave => "dragleave",
            DomEventKind::Drop => "drop",
            DomEventKind::DragEnd => "dragend",
        }
    }

    pub fn from_event_type(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.event_type() == name)
    }

    /// Drag-over and drop must be accepted (`preventDefault`) for a drop to happen.
    pub fn accepts_drop(self) -> bool {
        matches!(self, DomEventKind::DragOver | DomEventKind::Drop)
    }
}

/// The nearest meaningful element under an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A row's close button.
    CloseButton(TabId),
    Row(TabId),
    Header(WindowId),
    /// Anywhere else in the container.
    Empty,
}

/// Translate a DOM event into a gesture.
///
/// Header events never fall through to row handling, and close-button
/// clicks never count as row clicks.
pub fn gesture_for(kind: DomEventKind, target: PointerTarget) -> Option<Gesture> {
    use PointerTarget as T;

    match (kind, target) {
        (DomEventKind::Click, T::CloseButton(tab)) => Some(Gesture::Close(tab)),
        (DomEventKind::Click, T::Row(tab)) => Some(Gesture::Activate(tab)),
        (DomEventKind::Click, _) => None,

        (DomEventKind::DragStart, T::Row(tab) | T::CloseButton(tab)) => {
            Some(Gesture::DragStart(tab))
        }
        (DomEventKind::DragStart, _) => None,

        (DomEventKind::DragOver, T::Header(window)) => Some(Gesture::HeaderDragOver(window)),
        (DomEventKind::DragOver, T::Row(tab) | T::CloseButton(tab)) => {
            Some(Gesture::DragOver(Some(tab)))
        }
        (DomEventKind::DragOver, T::Empty) => Some(Gesture::DragOver(None)),

        (DomEventKind::DragLeave, T::Header(window)) => Some(Gesture::HeaderDragLeave(window)),
        (DomEventKind::DragLeave, T::Row(tab) | T::CloseButton(tab)) => {
            Some(Gesture::DragLeave(tab))
        }
        (DomEventKind::DragLeave, T::Empty) => None,

        (DomEventKind::Drop, T::Header(window)) => Some(Gesture::HeaderDrop(window)),
        (DomEventKind::Drop, T::Row(tab) | T::CloseButton(tab)) => Some(Gesture::Drop(Some(tab))),
        (DomEventKind::Drop, T::Empty) => Some(Gesture::Drop(None)),

        (DomEventKind::DragEnd, _) => Some(Gesture::DragEnd),
    }
}
