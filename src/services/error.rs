use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Statement is empty or malformed")]
    EmptyStatement,

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl From<ConvertError> for ApplicationError {
    fn from(error: ConvertError) -> Self {
        match error {
            ConvertError::EmptyStatement
            | ConvertError::MalformedRecord(_)
            | ConvertError::InvalidDate(_) => ApplicationError::BadRequest(error.to_string()),
        }
    }
}

impl From<csv::Error> for ConvertError {
    fn from(error: csv::Error) -> Self {
        ConvertError::MalformedRecord(error.to_string())
    }
}
