use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Set by the runner when debug logging is enabled for a workflow run.
const RUNNER_DEBUG: &str = "RUNNER_DEBUG";

fn default_directive(runner_debug: Option<&str>) -> &'static str {
    match runner_debug {
        Some("1") => "debug",
        _ => "info",
    }
}

/// Logs go to stderr, stdout is reserved for workflow commands.
/// `RUST_LOG` overrides the default level.
pub fn init_logging() {
    let runner_debug = std::env::var(RUNNER_DEBUG).ok();
    let filter = EnvFilter::builder()
        .with_default_directive(
            default_directive(runner_debug.as_deref())
                .parse()
                .unwrap_or_else(|_| LevelFilter::INFO.into()),
        )
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
