use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Version proof fetch failed. Aborts the whole cycle, since the proof
    /// response is required context for every modification.
    #[error("failed to validate modification versions: {0}")]
    VersionProof(#[source] reqwest::Error),

    /// Changelog fetch failed for one modification. Skips only that one.
    #[error("failed to retrieve changelog of {modification}: {source}")]
    Changelog {
        modification: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
