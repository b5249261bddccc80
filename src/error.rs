use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] rocksdb::Error),

    #[error("Codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("Invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Cannot convert {file_id} to {format}")]
    ContentConversion { file_id: String, format: String },

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("{0}")]
    Other(String),
}
