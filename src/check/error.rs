use thiserror::Error;

/// Everything that can stop a label check from reporting success.
///
/// Only [`CheckError::Configuration`] and [`CheckError::Violation`] are routed through the
/// failure path (status comment + reported failure). The remaining kinds are fatal: the run is
/// marked as failed with the error message and no outputs are produced.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("{0}")]
    Configuration(String),
    #[error("Cannot resolve the issue or pull request: {0}")]
    Identity(String),
    #[error("Invalid label pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("GitHub API error: {0:#}")]
    Platform(#[from] anyhow::Error),
    #[error("{0}")]
    Violation(String),
    #[error("Cannot report results to the runner: {0}")]
    Runner(#[source] std::io::Error),
}

impl CheckError {
    /// Returns `true` if the error ends the run without going through the failure path.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            CheckError::Configuration(_) | CheckError::Violation(_)
        )
    }
}
