//! Errors surfaced by the auth endpoints.
//!
//! The chat endpoint never returns these; it folds every failure into a
//! [`crate::ChatOutcome`].

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("could not reach the server: {0}")]
    Network(#[from] reqwest::Error),

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("server rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("server returned invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Whether the stored session should be discarded.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }
}
