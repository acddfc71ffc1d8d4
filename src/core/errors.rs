use thiserror::Error as ThisError;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Boxed error type used to carry underlying causes from external services.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure mode of a synchronization run. Each variant maps to exactly one
/// terminal invocation outcome; see [Error::status_code].
#[derive(Debug, ThisError)]
pub enum Error {
    /// The HTTPS request for the IP Ranges document failed.
    #[error("failed to fetch IP ranges document: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The response body was not a valid IP Ranges document.
    #[error("failed to parse IP ranges document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The managed IP set could not be read.
    #[error("failed to read IP set: {0}")]
    Lookup(#[source] BoxError),

    /// The managed IP set could not be written, including lock-token conflicts
    /// with a concurrent writer.
    #[error("failed to update IP set: {0}")]
    Update(#[source] BoxError),

    /// The invocation payload did not carry the expected fields. Maps to a
    /// client-input outcome rather than an internal error.
    #[error("invalid invocation payload: {0}")]
    Input(String),

    /// Required environment configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP-equivalent status code for the terminal invocation response.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Input(_) => 400,
            _ => 500,
        }
    }
}

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_is_client_outcome() {
        let error = Error::Input("missing url".to_string());
        assert_eq!(error.status_code(), 400);
    }

    #[test]
    fn test_other_errors_are_internal_outcomes() {
        let lookup = Error::Lookup("no such IP set".into());
        let update = Error::Update("stale lock token".into());
        let config = Error::Config("IP_SET_ID is not set".to_string());
        assert_eq!(lookup.status_code(), 500);
        assert_eq!(update.status_code(), 500);
        assert_eq!(config.status_code(), 500);
    }
}
