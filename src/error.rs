use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error("order of BTree must be at least 2, but order {0} was given")]
    OrderTooSmall(usize),
    #[error("line {line} of key file is not an integer: {token:?}")]
    InvalidInput { line: usize, token: String },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
