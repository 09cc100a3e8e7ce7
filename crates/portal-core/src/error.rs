use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    #[error("Unknown date range: {0}")]
    UnknownDateBucket(String),

    #[error("Page size must be greater than zero")]
    InvalidPageSize,
}

pub type Result<T> = std::result::Result<T, Error>;
