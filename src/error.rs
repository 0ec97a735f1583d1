use std::path::PathBuf;
use thiserror::Error;

pub const ROOT_ENV_VAR: &str = "PROJECT_ROOT";

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("Could not find project root. Please set {} environment variable", ROOT_ENV_VAR)]
    RootNotFound,

    #[error("docs directory not found in project root ({})", .0.display())]
    DocsNotFound(PathBuf),

    /// The user interrupted a prompt (Ctrl-C, or stdin closed).
    #[error("operation cancelled by user")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

impl PickerError {
    /// Errors caused by the project layout rather than by the run itself.
    pub fn is_configuration(&self) -> bool {
        matches!(self, PickerError::RootNotFound | PickerError::DocsNotFound(_))
    }
}
