//! TabDeck popup configuration.
//!
//! TOML-based configuration with serde defaults and validation. A copy of
//! `config.toml` is compiled into the extension; partial files work because
//! every section falls back to its defaults.
//!
//! ```rust,no_run
//! let config = tabdeck_config::load_bundled().expect("bundled config");
//! assert_eq!(config.view.container_id, "tabs");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{DragConfig, LoggingConfig, PopupConfig, ViewConfig};
pub use toml_loader::{load_bundled, load_from_str};

