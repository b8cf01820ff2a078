use crate::config::ConfigError;
use crate::swap::SwapError;
use thiserror::Error;

/// Application-level error that separates user interruptions from real failures
#[derive(Error, Debug)]
pub enum FswError {
    /// User interrupted operation (CTRL-C / ESC)
    #[error("Interrupted by user")]
    UserInterrupted,

    /// Other errors that should be displayed to the user
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<inquire::InquireError> for FswError {
    fn from(error: inquire::InquireError) -> Self {
        match error {
            inquire::InquireError::OperationInterrupted
            | inquire::InquireError::OperationCanceled => FswError::UserInterrupted,
            other => FswError::Other(other.into()),
        }
    }
}

impl From<dialoguer::Error> for FswError {
    fn from(error: dialoguer::Error) -> Self {
        match error {
            dialoguer::Error::IO(ref io) if io.kind() == std::io::ErrorKind::Interrupted => {
                FswError::UserInterrupted
            }
            other => FswError::Other(other.into()),
        }
    }
}

impl From<SwapError> for FswError {
    fn from(error: SwapError) -> Self {
        FswError::Other(error.into())
    }
}

impl From<ConfigError> for FswError {
    fn from(error: ConfigError) -> Self {
        FswError::Other(error.into())
    }
}

/// Result type alias for FSW operations
pub type FswResult<T> = Result<T, FswError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_cancellation_is_user_interrupt() {
        let err: FswError = inquire::InquireError::OperationCanceled.into();
        assert!(matches!(err, FswError::UserInterrupted));

        let err: FswError = dialoguer::Error::IO(std::io::Error::from(
            std::io::ErrorKind::Interrupted,
        ))
        .into();
        assert!(matches!(err, FswError::UserInterrupted));
    }

    #[test]
    fn test_other_prompt_errors_are_reported() {
        let err: FswError = dialoguer::Error::IO(std::io::Error::other("tty gone")).into();
        assert!(matches!(err, FswError::Other(_)));
    }
}
