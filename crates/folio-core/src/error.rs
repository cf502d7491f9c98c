use thiserror::Error;

/// All the ways a folio load or interaction can go wrong
///
/// Only `NetworkError` and `ParseError` ever reach the user, and even then
/// only as the single "Failed to load repositories." line. The rest are for
/// the CLI and the logs.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<folio_api::GitHubError> for Error {
    fn from(err: folio_api::GitHubError) -> Self {
        if err.is_parse_error() {
            Error::ParseError(err.to_string())
        } else {
            Error::NetworkError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_map_to_network_or_parse() {
        let status = folio_api::GitHubError::RequestFailed {
            status: 503,
            body: String::new(),
        };
        assert!(matches!(Error::from(status), Error::NetworkError(_)));

        let parse = folio_api::github::parse_repos("{").unwrap_err();
        assert!(matches!(Error::from(parse), Error::ParseError(_)));

        let missing = folio_api::GitHubError::NotFound("ghost".into());
        assert!(matches!(Error::from(missing), Error::NetworkError(_)));
    }
}
