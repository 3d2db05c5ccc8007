use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("{errors} file(s) failed during batch processing")]
    BatchFailures { errors: usize },

    #[error(transparent)]
    Library(#[from] coordclean::Error),
}
