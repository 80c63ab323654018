use std::str::FromStr;

/// What a failed check does to the workflow run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExitType {
    /// Only emit a warning, the step still succeeds.
    Success,
    /// Fail the step.
    #[default]
    Failure,
}

impl ExitType {
    pub const ALLOWED: [&'static str; 2] = ["success", "failure"];
}

impl FromStr for ExitType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "success" => Ok(Self::Success),
            "failure" => Ok(Self::Failure),
            _ => Err(format!(
                "Unknown exit_type input [{value}]. Must be one of: {}",
                Self::ALLOWED.join(", ")
            )),
        }
    }
}

/// Receives the results of a check. Implemented by the GitHub Actions runner glue.
pub trait Reporter {
    fn debug(&mut self, message: &str);

    /// Non-fatal annotation; the run is allowed to succeed.
    fn warning(&mut self, message: &str);

    /// Marks the run as failed with `message` as the explanation.
    fn set_failed(&mut self, message: &str);

    fn set_output(&mut self, name: &str, value: &str) -> std::io::Result<()>;
}

pub const OUTPUT_LABELS: &str = "labels";
pub const OUTPUT_STATUS: &str = "status";

pub fn report_success<R: Reporter + ?Sized>(
    reporter: &mut R,
    intersection: &[String],
) -> std::io::Result<()> {
    reporter.set_output(OUTPUT_LABELS, &intersection.join(","))?;
    reporter.set_output(OUTPUT_STATUS, "success")
}

/// Reports a failed check. Whether the run itself fails depends on `exit_type`.
pub fn report_failure<R: Reporter + ?Sized>(
    reporter: &mut R,
    exit_type: ExitType,
    message: &str,
) -> std::io::Result<()> {
    reporter.set_output(OUTPUT_STATUS, "failure")?;
    match exit_type {
        ExitType::Success => reporter.warning(message),
        ExitType::Failure => reporter.set_failed(message),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::reporter::{Annotation, TestReporter};

    #[test]
    fn parse_exit_type() {
        assert_eq!("success".parse::<ExitType>(), Ok(ExitType::Success));
        assert_eq!("failure".parse::<ExitType>(), Ok(ExitType::Failure));
        insta::assert_snapshot!(
            "fail".parse::<ExitType>().unwrap_err(),
            @"Unknown exit_type input [fail]. Must be one of: success, failure"
        );
    }

    #[test]
    fn success_sets_labels_and_status() {
        let mut reporter = TestReporter::default();
        report_success(&mut reporter, &["bug".to_string(), "docs".to_string()]).unwrap();
        assert_eq!(reporter.output("labels"), Some("bug,docs"));
        assert_eq!(reporter.output("status"), Some("success"));
        assert!(!reporter.failed());
    }

    #[test]
    fn failure_with_exit_type_failure_fails_the_run() {
        let mut reporter = TestReporter::default();
        report_failure(&mut reporter, ExitType::Failure, "Missing label").unwrap();
        assert_eq!(reporter.output("status"), Some("failure"));
        assert_eq!(reporter.output("labels"), None);
        assert_eq!(
            reporter.annotations,
            vec![Annotation::Error("Missing label".to_string())]
        );
        assert!(reporter.failed());
    }

    #[test]
    fn failure_with_exit_type_success_only_warns() {
        let mut reporter = TestReporter::default();
        report_failure(&mut reporter, ExitType::Success, "Missing label").unwrap();
        assert_eq!(reporter.output("status"), Some("failure"));
        assert_eq!(
            reporter.annotations,
            vec![Annotation::Warning("Missing label".to_string())]
        );
        assert!(!reporter.failed());
    }
}
