use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EffectsError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid effects config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize effects config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, EffectsError>;
