use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed value in column {column} at line {line}: {value:?}")]
    Malformed {
        column: &'static str,
        line: u64,
        value: String,
    },

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Similarity index is empty")]
    EmptyIndex,

    #[error("Invalid band: {0}")]
    InvalidBand(String),
}

impl Error {
    /// True for errors raised while reading or parsing the catalog source
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::Csv(_) | Error::MissingColumn(_) | Error::Malformed { .. }
        )
    }
}
