//! TabDeck tab list view.
//!
//! Host-agnostic core of the popup: the rendering surface and host traits,
//! the drag-and-drop engine, the view itself, and the driver that connects
//! them. In-memory implementations of both traits live here too, so the
//! whole popup runs natively under `cargo test`.

pub mod drag;
pub mod gesture;
pub mod host;
pub mod popup;
pub mod surface;
pub mod view;

pub use drag::{Destination, DragSession};
pub use gesture::{gesture_for, DomEventKind, Gesture, PointerTarget};
pub use host::{Callback, HostCall, HostCompletion, HostRequest, MemoryHost, TabHost};
pub use popup::Popup;
pub use surface::{HeaderSpec, Highlight, MemorySurface, RowMeta, RowSpec, Surface};
pub use view::TabListView;
