//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod drag;
mod logging;
mod view;

pub use drag::*;
pub use logging::*;
pub use view::*;

use serde::{Deserialize, Serialize};

/// Root configuration for the popup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub view: ViewConfig,
    pub drag: DragConfig,
    pub logging: LoggingConfig,
}
