use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to extract text: {0}")]
    ExtractionFailed(String),
    #[error("Invalid skill dictionary: {0}")]
    InvalidDictionary(String),
    #[error("Job not found: {0}")]
    JobNotFound(String),
}

impl CoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::ExtractionFailed(_))
    }
}
