use thiserror::Error;

#[derive(Debug, Error)]
pub enum PagePointerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Browser session error: {0}")]
    Session(String),

    /// The element is missing, detached or stale, or the session is gone.
    #[error("Element unavailable: {0}")]
    ElementUnavailable(String),

    #[error("Geometry query failed: {0}")]
    GeometryQuery(String),

    #[error("Display query failed: {0}")]
    Display(String),

    #[error("Pointer control error: {0}")]
    Pointer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type PagePointerResult<T> = Result<T, PagePointerError>;
