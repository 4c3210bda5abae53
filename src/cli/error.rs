//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),

    #[error("{failed} of {total} mesh codes could not be decoded")]
    DecodeFailed { failed: usize, total: usize },
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::DecodeFailed { .. } => crate::exitcode::DATAERR,
            CliError::Infra(e) => match e {
                InfraError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                    crate::exitcode::NOINPUT
                }
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Csv { .. } => crate::exitcode::DATAERR,
                InfraError::Json { .. } => crate::exitcode::SOFTWARE,
                InfraError::Application(
                    ApplicationError::Config { .. } | ApplicationError::InvalidSetting { .. },
                ) => crate::exitcode::CONFIG,
                InfraError::Application(ApplicationError::Domain(_)) => crate::exitcode::DATAERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_exit_codes() {
        let missing = CliError::from(InfraError::io(
            "open x.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        ));
        assert_eq!(missing.exit_code(), crate::exitcode::NOINPUT);

        let config = CliError::from(ApplicationError::Config {
            message: "bad".into(),
        });
        assert_eq!(config.exit_code(), crate::exitcode::CONFIG);

        let invalid = CliError::from(ApplicationError::InvalidSetting {
            key: "style.opacity",
            reason: "out of range".into(),
        });
        assert_eq!(invalid.exit_code(), crate::exitcode::CONFIG);

        let domain = CliError::from(ApplicationError::Domain(
            DomainError::InvalidMeshCodeLength { length: 3 },
        ));
        assert_eq!(domain.exit_code(), crate::exitcode::DATAERR);

        let decode = CliError::DecodeFailed {
            failed: 1,
            total: 2,
        };
        assert_eq!(decode.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(decode.to_string(), "1 of 2 mesh codes could not be decoded");
    }
}
