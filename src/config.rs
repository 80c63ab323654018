//! Inputs of the action, as passed by the GitHub Actions runner in `INPUT_<NAME>` variables.
use secrecy::SecretString;

use crate::check::mode::ComparisonMode;
use crate::check::patterns::MatchMode;
use crate::check::report::ExitType;
use crate::check::CheckError;

pub const DEFAULT_MESSAGE: &str =
    "Label error. Requires {{ errorString }} {{ count }} of: {{ provided }}. Found: {{ applied }}";

/// The only value accepted as `true` for boolean inputs.
const TRUE: &str = "true";

#[derive(clap::Args, Debug)]
pub struct ActionInputs {
    /// Token used to access the GitHub API.
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// One of `exactly`, `minimum` or `maximum`.
    #[arg(long, env = "INPUT_MODE")]
    pub mode: String,

    /// How many of the labels are required.
    #[arg(long, env = "INPUT_COUNT")]
    pub count: String,

    /// Labels (or regular expressions) to look for, separated by newlines or commas.
    #[arg(long, env = "INPUT_LABELS")]
    pub labels: String,

    /// `success` only emits a warning on failure, `failure` fails the step.
    #[arg(long, env = "INPUT_EXIT_TYPE", default_value = "failure")]
    pub exit_type: String,

    /// `true` keeps a status comment on the pull request.
    #[arg(long, env = "INPUT_ADD_COMMENT", default_value = "false")]
    pub add_comment: String,

    /// `true` treats every line of `labels` as a regular expression.
    #[arg(long, env = "INPUT_USE_REGEX", default_value = "false")]
    pub use_regex: String,

    /// Template of the failure message.
    #[arg(long, env = "INPUT_MESSAGE", default_value = DEFAULT_MESSAGE)]
    pub message: String,
}

impl ActionInputs {
    /// Splits off the API token and converts the remaining inputs into a [`CheckConfig`].
    pub fn into_config(self) -> (SecretString, CheckConfig) {
        let config = CheckConfig {
            mode: self.mode.trim().to_string(),
            count: self.count.trim().to_string(),
            exit_type: self.exit_type.trim().to_string(),
            add_comment: parse_flag(&self.add_comment),
            use_regex: parse_flag(&self.use_regex),
            labels: self.labels.trim().to_string(),
            message: self.message.trim().to_string(),
        };
        (SecretString::new(self.token.trim().to_string()), config)
    }
}

/// Boolean inputs fail closed: anything but the exact `true` token is `false`.
pub fn parse_flag(value: &str) -> bool {
    value.trim() == TRUE
}

/// Configuration of a single check.
///
/// `mode`, `count` and `exit_type` are kept as text, because an invalid value has to be
/// reported through the regular failure path (see [`CheckConfig::validate`]).
#[derive(Clone, Debug)]
pub struct CheckConfig {
    pub mode: String,
    pub count: String,
    pub exit_type: String,
    pub add_comment: bool,
    pub use_regex: bool,
    pub labels: String,
    pub message: String,
}

/// Validated part of [`CheckConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckSettings {
    pub mode: ComparisonMode,
    pub count: usize,
}

impl CheckConfig {
    pub fn match_mode(&self) -> MatchMode {
        if self.use_regex {
            MatchMode::Regex
        } else {
            MatchMode::Exact
        }
    }

    /// Checks `mode`, `exit_type` and `count`, in this order.
    pub fn validate(&self) -> Result<CheckSettings, CheckError> {
        let mode = self
            .mode
            .parse::<ComparisonMode>()
            .map_err(CheckError::Configuration)?;
        self.exit_type()?;
        let count = self.count.parse::<usize>().map_err(|_| {
            CheckError::Configuration(format!(
                "Invalid count input [{}]. Must be a non-negative integer",
                self.count
            ))
        })?;
        Ok(CheckSettings { mode, count })
    }

    /// An empty `exit_type` means the default.
    fn exit_type(&self) -> Result<ExitType, CheckError> {
        if self.exit_type.is_empty() {
            return Ok(ExitType::default());
        }
        self.exit_type
            .parse::<ExitType>()
            .map_err(CheckError::Configuration)
    }

    /// Exit type used to report a failure, even when the configuration itself is invalid.
    pub fn failure_exit_type(&self) -> ExitType {
        self.exit_type().unwrap_or_default()
    }
}
