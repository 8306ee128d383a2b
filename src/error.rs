use std::fmt;

#[derive(Debug)]
pub enum RepoSummaryError {
    IoError(std::io::Error),
    ConfigError(String),
    InvalidProvider(String),
}

impl std::error::Error for RepoSummaryError {}

impl fmt::Display for RepoSummaryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RepoSummaryError::IoError(err) => write!(f, "IO error: {}", err),
            RepoSummaryError::ConfigError(err) => write!(f, "Configuration error: {}", err),
            RepoSummaryError::InvalidProvider(name) => {
                write!(f, "Invalid LLM provider: {}", name)
            }
        }
    }
}

impl From<std::io::Error> for RepoSummaryError {
    fn from(err: std::io::Error) -> Self {
        RepoSummaryError::IoError(err)
    }
}

impl From<toml::de::Error> for RepoSummaryError {
    fn from(err: toml::de::Error) -> Self {
        RepoSummaryError::ConfigError(err.to_string())
    }
}

impl From<toml::ser::Error> for RepoSummaryError {
    fn from(err: toml::ser::Error) -> Self {
        RepoSummaryError::ConfigError(err.to_string())
    }
}
