pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] stratum_graphlib::Error),

    #[error("bad input ({context}): {message}")]
    BadInput { context: String, message: String },

    #[error("unsupported layout schema version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
