use thiserror::Error;

pub type PResult<T> = Result<T, ParsingError>;

#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("Nom parsing error: {0}")]
    ParseError(#[from] nom::Err<nom::error::Error<String>>),
    #[error("Unknown error: {0}")]
    Unknown(String),
    #[error("Departure field {0:?} has no time-of-day position")]
    DepartureFieldTooShort(String),
    #[error("Invalid time of day {0:?}")]
    InvalidTimeOfDay(String),
    #[error("Failed to parse {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

impl From<nom::Err<nom::error::Error<&str>>> for ParsingError {
    fn from(value: nom::Err<nom::error::Error<&str>>) -> Self {
        ParsingError::ParseError(value.map_input(String::from))
    }
}

impl From<&str> for ParsingError {
    fn from(value: &str) -> Self {
        ParsingError::Unknown(value.to_string())
    }
}
