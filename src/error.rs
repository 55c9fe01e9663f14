use crate::validation::Rejection;
use std::io;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid booking: {0}")]
    Validation(#[from] Rejection),

    #[error("appointment not found: {0}")]
    NotFound(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid staff credentials")]
    Unauthorized,

    #[error("storage failure: {0}")]
    Storage(#[from] io::Error),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Storage(err.into())
    }
}
