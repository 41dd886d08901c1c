use thiserror::Error;

/// Failures that abort a reminder run.
///
/// Every variant is fatal: main logs it and exits non-zero. There is no
/// retry path and no partial digest.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to fetch {resource}: {source}")]
    Fetch { resource: String, source: ApiError },

    #[error("failed to deliver digest: {0}")]
    Delivery(ApiError),
}

impl Error {
    pub fn fetch(resource: impl Into<String>, source: ApiError) -> Self {
        Self::Fetch {
            resource: resource.into(),
            source,
        }
    }
}

/// What went wrong with a single HTTP exchange.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}
