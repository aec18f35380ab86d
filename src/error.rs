//! Error types for iLO operations.

use thiserror::Error;

use crate::credentials::CredentialSource;

/// Failure of a single remote call against the iLO.
///
/// Dispatchers catch this, log it and render an empty result. It never
/// escapes an operation.
#[derive(Debug, Error)]
pub enum IloError {
    /// The management tool could not be started
    #[error("failed to run {tool}: {reason}")]
    Spawn { tool: String, reason: String },

    /// The management tool ran and reported an error
    #[error("{0}")]
    CommandFailed(String),

    /// The management tool printed something that is not the expected JSON
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Credential resolution failures.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("profile '{0}' not found in configuration")]
    ProfileNotFound(String),

    #[error("missing credentials: '{field}' is not set in {origin}")]
    MissingField {
        origin: CredentialSource,
        field: &'static str,
    },
}

/// Hard failures of an operation. Remote call failures are not in here,
/// see [`crate::operations::Outcome`].
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// Unknown operation name or arguments of the wrong type
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, ModuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IloError::CommandFailed("Login failed.".to_string());
        assert_eq!(err.to_string(), "Login failed.");

        let err = IloError::Spawn {
            tool: "hpilo_cli".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert_eq!(err.to_string(), "failed to run hpilo_cli: No such file or directory");

        let err: ModuleError = CredentialError::MissingField {
            origin: CredentialSource::Profile("server1-ilo".to_string()),
            field: "password",
        }
        .into();
        assert_eq!(
            err.to_string(),
            "missing credentials: 'password' is not set in profile 'server1-ilo'"
        );
    }
}
