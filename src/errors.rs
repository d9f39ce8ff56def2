use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration parse error: {0}")]
    ConfigParseError(String),

    #[error("Output directory is not writable: {0}")]
    OutputNotWritable(String),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("File read error: {0}")]
    FileReadError(String),
}

impl From<std::io::Error> for MergeError {
    fn from(err: std::io::Error) -> Self {
        MergeError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for MergeError {
    fn from(err: serde_json::Error) -> Self {
        MergeError::ConfigParseError(err.to_string())
    }
}
