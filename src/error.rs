use std::io;

/// Errors raised at the edges of the gallery: config files, snapshot files
/// and invalid settings. The timeline pipeline itself cannot fail.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row size must be at least 1, got {0}")]
    InvalidRowSize(usize),

    #[error("could not determine a config directory")]
    ConfigDirUnavailable,
}

pub type Result<T> = std::result::Result<T, Error>;
