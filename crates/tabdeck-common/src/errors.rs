#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// A failed call into the browser's tab/window API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("enumerate windows failed: {0}")]
    Enumerate(String),

    #[error("move tab failed: {0}")]
    Move(String),

    #[error("remove tab failed: {0}")]
    Remove(String),

    #[error("update tab failed: {0}")]
    UpdateTab(String),

    #[error("update window failed: {0}")]
    UpdateWindow(String),

    #[error("malformed host response: {0}")]
    Malformed(String),

    #[error("host unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("container not found: #{0}")]
    ContainerNotFound(String),

    #[error("dom error: {0}")]
    Dom(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TabDeckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl From<serde_json::Error> for HostError {
    fn from(e: serde_json::Error) -> Self {
        HostError::Malformed(e.to_string())
    }
}
