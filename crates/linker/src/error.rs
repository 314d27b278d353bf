use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinkerError>;

#[derive(Error, Debug)]
pub enum LinkerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("watched root is not a directory: {0}")]
    InvalidRoot(String),

    #[error("output root is not a directory: {0}")]
    InvalidOutputRoot(String),
}
