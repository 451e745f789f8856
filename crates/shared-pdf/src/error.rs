use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfTextError {
    #[error("Not a PDF document")]
    NotAPdf,

    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("PDF has no pages")]
    Empty,
}
