use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can happen while loading a dictionary.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unsupported encoding {0}")]
    UnsupportedEncoding(String),
    #[error("{0:#}")]
    Malformed(anyhow::Error),
}

impl From<anyhow::Error> for LoadError {
    fn from(e: anyhow::Error) -> Self {
        LoadError::Malformed(e)
    }
}
