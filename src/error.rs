use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required column '{column}' in {path}")]
    MissingField { column: String, path: String },
}

pub type Result<T> = std::result::Result<T, NotifyError>;
