//! Workflow commands and step outputs of the GitHub Actions runner.
//!
//! See <https://docs.github.com/en/actions/using-workflows/workflow-commands-for-github-actions>.
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::check::report::Reporter;

const OUTPUT_DELIMITER: &str = "ghadelimiter_require_labels";

/// Escapes the message of a workflow command.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Formats a `name=value` entry of the `GITHUB_OUTPUT` file.
fn format_output(name: &str, value: &str) -> io::Result<String> {
    if !value.contains('\n') {
        return Ok(format!("{name}={value}\n"));
    }
    if value.contains(OUTPUT_DELIMITER) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Value of output `{name}` contains the output delimiter"),
        ));
    }
    Ok(format!(
        "{name}<<{OUTPUT_DELIMITER}\n{value}\n{OUTPUT_DELIMITER}\n"
    ))
}

/// Reports results to the runner: annotations go to `out` (stdout when running as an action),
/// outputs are appended to the `GITHUB_OUTPUT` file.
pub struct ActionsReporter<W: Write> {
    out: W,
    output_file: Option<PathBuf>,
    failed: bool,
}

impl ActionsReporter<io::Stdout> {
    pub fn stdout(output_file: Option<PathBuf>) -> Self {
        Self::new(io::stdout(), output_file)
    }
}

impl<W: Write> ActionsReporter<W> {
    pub fn new(out: W, output_file: Option<PathBuf>) -> Self {
        Self {
            out,
            output_file,
            failed: false,
        }
    }

    /// Was the run marked as failed?
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn command(&mut self, command: &str, message: &str) {
        if let Err(error) = writeln!(self.out, "::{command}::{}", escape_data(message)) {
            tracing::error!("Cannot write workflow command `{command}`: {error:?}");
        }
    }
}

impl<W: Write> Reporter for ActionsReporter<W> {
    fn debug(&mut self, message: &str) {
        tracing::debug!("{message}");
        self.command("debug", message);
    }

    fn warning(&mut self, message: &str) {
        tracing::warn!("{message}");
        self.command("warning", message);
    }

    fn set_failed(&mut self, message: &str) {
        tracing::error!("{message}");
        self.failed = true;
        self.command("error", message);
    }

    fn set_output(&mut self, name: &str, value: &str) -> io::Result<()> {
        tracing::debug!("Setting output {name}={value}");
        match &self.output_file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(format_output(name, value)?.as_bytes())
            }
            None => writeln!(
                self.out,
                "::set-output name={name}::{}",
                escape_data(value)
            ),
        }
    }
}
