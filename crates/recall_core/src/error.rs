use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("{0}")]
    Validation(String),

    #[error("{0} is already in progress")]
    Busy(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Sync error: {0}")]
    Sync(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True for failures of an external service (row store, model, webhook).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Feed(_) | Error::Inference(_) | Error::EmptyResponse | Error::Sync(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        assert!(Error::EmptyResponse.is_upstream());
        assert!(Error::Inference("bad schema".to_string()).is_upstream());
        assert!(!Error::Validation("topic required".to_string()).is_upstream());
        assert!(!Error::Busy("Analysis".to_string()).is_upstream());
    }

    #[test]
    fn test_busy_message() {
        let err = Error::Busy("Vocabulary sync".to_string());
        assert_eq!(err.to_string(), "Vocabulary sync is already in progress");
    }
}
