#[cfg(feature = "stl-io")]
pub mod stl;

/// I/O and format‑conversion errors.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error("Could not parse configuration: {0}")]
    Config(#[from] ron::error::SpannedError),

    #[error("Could not serialize configuration: {0}")]
    ConfigWrite(#[from] ron::Error),
}
