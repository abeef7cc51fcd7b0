use thiserror::Error;

/// Errors that can arise in the world/content/save layers.
///
/// Most of these never reach the player: missing content degrades to
/// placeholder text and save write failures are logged and swallowed by the
/// session loop. They surface as hard errors only at startup (opening the
/// store, reading the world file).
#[derive(Debug, Error)]
pub enum GameError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around IO errors (directory creation, world file reads).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around world-file deserialization errors.
    #[error("world content error: {0}")]
    Json(#[from] serde_json::Error),

    /// The save store can no longer serve requests (e.g. a poisoned lock).
    #[error("save store unavailable: {0}")]
    StoreUnavailable(String),
}
