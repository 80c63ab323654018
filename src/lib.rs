//! A GitHub Actions check that requires a pull request (or issue) to carry a
//! given number of labels, and keeps a single status comment on it in sync.
pub mod check;
pub mod config;
pub mod github;
pub mod utils;

pub use check::{run_check, CheckContext, CheckError, CheckOutcome};
pub use config::{ActionInputs, CheckConfig};

#[cfg(test)]
mod tests;
