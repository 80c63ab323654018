use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use require_labels::check::report::Reporter;
use require_labels::github::actions::ActionsReporter;
use require_labels::github::{create_github_client, ActionContext, GithubRequestClient};
use require_labels::utils::logging::init_logging;
use require_labels::{run_check, ActionInputs, CheckContext, CheckOutcome};

#[derive(clap::Parser)]
struct Opts {
    #[command(flatten)]
    inputs: ActionInputs,

    #[command(flatten)]
    context: ActionContext,

    /// File that receives the step outputs.
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf>,
}

fn try_main(opts: Opts, reporter: &mut ActionsReporter<std::io::Stdout>) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Cannot build tokio runtime")?;

    let Opts {
        inputs, context, ..
    } = opts;
    let (token, config) = inputs.into_config();

    let repo = context.repo_name()?;
    let issue = context.resolve_issue()?;
    tracing::info!("Checking labels of {repo}#{issue}");

    let check = CheckContext {
        issue,
        marker: context.marker(),
        config,
    };

    // The octocrab client has to be created inside of the runtime.
    let outcome = runtime.block_on(async {
        let client = GithubRequestClient::new(
            create_github_client(&token, Some(context.api_url.as_str()))?,
            repo,
        );
        anyhow::Ok(run_check(&client, reporter, &check).await?)
    })?;
    match outcome {
        CheckOutcome::Passed { intersection } => {
            tracing::info!("Label check passed with {intersection:?}");
        }
        CheckOutcome::Failed { message } => {
            tracing::debug!("Label check reported failure: {message}");
        }
    }
    Ok(())
}

/// Invalid or missing inputs fail the step with an annotation. Help and version requests are
/// printed by clap as usual.
fn report_parse_error<W: Write>(reporter: &mut ActionsReporter<W>, error: clap::Error) {
    match error.kind() {
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
            error.exit()
        }
        _ => reporter.set_failed(error.to_string().trim_end()),
    }
}

fn main() {
    init_logging();

    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(error) => {
            let mut reporter = ActionsReporter::stdout(None);
            report_parse_error(&mut reporter, error);
            std::process::exit(1);
        }
    };
    let mut reporter = ActionsReporter::stdout(opts.output_file.clone());
    if let Err(error) = try_main(opts, &mut reporter) {
        reporter.set_failed(&format!("{error:#}"));
    }
    if reporter.failed() {
        std::process::exit(1);
    }
}
