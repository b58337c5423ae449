use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropCheckError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid dataset: {0}")]
    Dataset(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl CropCheckError {
    /// Stable machine-readable name used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            CropCheckError::NotFound(_) => "not_found",
            CropCheckError::InvalidInput(_) => "invalid_input",
            CropCheckError::UpstreamUnavailable(_) | CropCheckError::Http(_) => {
                "upstream_unavailable"
            }
            CropCheckError::Config(_) => "config",
            CropCheckError::Io(_)
            | CropCheckError::Json(_)
            | CropCheckError::Csv(_)
            | CropCheckError::Dataset(_) => "internal",
        }
    }
}

pub type Result<T> = std::result::Result<T, CropCheckError>;
