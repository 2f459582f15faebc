use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Catalog is empty")]
    EmptyCatalog,

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DomainError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn fetch_failed(msg: impl Into<String>) -> Self {
        Self::FetchFailed(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_empty_catalog(&self) -> bool {
        matches!(self, Self::EmptyCatalog)
    }

    pub fn is_fetch_failed(&self) -> bool {
        matches!(self, Self::FetchFailed(_))
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    /// Text shown to the person asking, without transport details.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCatalog => {
                "No card data is loaded, so there is nothing to recommend yet.".to_string()
            }
            Self::FetchFailed(_) => {
                "I couldn't reach the recommendation service. Please try again in a moment."
                    .to_string()
            }
            Self::MalformedResponse(_) => {
                "I couldn't generate recommendations. Please try rephrasing your question."
                    .to_string()
            }
            Self::InvalidInput(msg) => msg.clone(),
            Self::Configuration(msg) => format!("The advisor is misconfigured: {msg}"),
            Self::IoError(e) => format!("Unexpected I/O problem: {e}"),
        }
    }
}
