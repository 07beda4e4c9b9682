pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // `source` is reserved by thiserror for the error chain.
    #[error("dangling reference: {node} -> {target} ({target} is not a node of this graph)")]
    DanglingReference { node: String, target: String },

    #[error("graph construction failed: {node} references {target}, which was never added")]
    Construction { node: String, target: String },

    #[error("unknown scope: {scope}")]
    UnknownScope { scope: String },

    #[error("unknown unit: {unit}")]
    UnknownUnit { unit: String },

    #[error("bad input ({context}): {message}")]
    BadInput { context: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn bad_input(context: impl Into<String>, message: impl ToString) -> Self {
        Self::BadInput {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
