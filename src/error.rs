use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The entity source could not be reached or did not deliver a usable snapshot
    #[error("failed to connect to entity source: {0}")]
    Connection(String),

    #[error("failed to write '{}': {source}", path.display())]
    AssetWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize dashboard data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
