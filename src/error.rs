use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{file}: missing required column `{column}`")]
    MissingColumn { file: String, column: String },

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("price dates must be strictly increasing: {prev} is followed by {next}")]
    UnorderedPrices { prev: String, next: String },
}
