pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, HostError, SurfaceError, TabDeckError};
pub use id::{TabId, WindowId};
pub use types::{MoveIndex, Tab, Window, APPEND_SENTINEL};
