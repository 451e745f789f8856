use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvaluatorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Model returned no content")]
    EmptyResponse,

    #[error("Invalid image: {0}")]
    InvalidImage(String),
}
