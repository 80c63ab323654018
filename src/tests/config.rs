use derive_builder::Builder;

use crate::check::comment::MarkerToken;
use crate::check::CheckContext;
use crate::config::{CheckConfig, DEFAULT_MESSAGE};
use crate::github::IssueNumber;

pub fn default_issue() -> IssueNumber {
    IssueNumber(1)
}

pub fn default_marker() -> MarkerToken {
    MarkerToken::new("CI", "labels", "require-labels")
}

#[derive(Builder)]
#[builder(pattern = "owned", setter(into), name = "ConfigBuilder")]
pub struct Config {
    #[builder(default = "\"minimum\".to_string()")]
    mode: String,
    #[builder(default = "\"1\".to_string()")]
    count: String,
    #[builder(default = "\"failure\".to_string()")]
    exit_type: String,
    #[builder(default)]
    add_comment: bool,
    #[builder(default)]
    use_regex: bool,
    #[builder(default = "\"bug,feature\".to_string()")]
    labels: String,
    #[builder(default = "DEFAULT_MESSAGE.to_string()")]
    message: String,
}

impl ConfigBuilder {
    pub fn create(self) -> CheckConfig {
        let Config {
            mode,
            count,
            exit_type,
            add_comment,
            use_regex,
            labels,
            message,
        } = self.build().unwrap();
        CheckConfig {
            mode,
            count,
            exit_type,
            add_comment,
            use_regex,
            labels,
            message,
        }
    }

    pub fn context(self) -> CheckContext {
        CheckContext {
            issue: default_issue(),
            marker: default_marker(),
            config: self.create(),
        }
    }
}
