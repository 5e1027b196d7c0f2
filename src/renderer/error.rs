use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed notification list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("List container not found: #{0}")]
    MissingContainer(String),

    #[error("Invalid link target: {0}")]
    InvalidLink(String),
}

impl From<url::ParseError> for RenderError {
    fn from(err: url::ParseError) -> Self {
        RenderError::InvalidLink(err.to_string())
    }
}
