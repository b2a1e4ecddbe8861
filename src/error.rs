use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShaftError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("unknown weight model: {0}")]
    UnknownModel(String),

    #[error("unreadable document {path}: {reason}")]
    UnreadableDocument { path: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ShaftError>;
