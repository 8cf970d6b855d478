use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration parse error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    /// The content API answered with a non-2xx status.
    #[error("Upstream returned {status} for {endpoint}")]
    Upstream { status: u16, endpoint: String },

    /// The content API refused a submission and said why.
    #[error("{0}")]
    Rejected(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Invalid submission: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
