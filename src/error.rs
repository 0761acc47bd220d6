use crate::parsing::error::ParsingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File {file}, at line {line_number}: {line}. Parsing error: {error:?}")]
    Parsing {
        error: ParsingError,
        file: String,
        line: String,
        line_number: usize,
    },
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("File {0} is not valid Big5 text")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
