use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
