use crate::config::default_log_filter;
use tracing_subscriber::EnvFilter;

/// Installs a plain-text stderr subscriber. `RUST_LOG` overrides `config_filter`.
///
/// A directive that fails to parse is reported on stderr and the next one is
/// tried: `RUST_LOG`, then `config_filter`, then `info`.
/// Calling this twice is an error; the driver's entry point calls it once.
pub fn init(config_filter: &str) -> Result<(), anyhow::Error> {
    let selection = select_filter(std::env::var("RUST_LOG").ok().as_deref(), config_filter)?;
    for rejected in &selection.rejected {
        eprintln!("Warning: {rejected:#}");
    }

    tracing_subscriber::fmt()
        .with_env_filter(selection.filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))
}

struct FilterSelection {
    filter: EnvFilter,
    rejected: Vec<anyhow::Error>,
}

fn select_filter(
    from_env: Option<&str>,
    config_filter: &str,
) -> Result<FilterSelection, anyhow::Error> {
    let fallback = default_log_filter();
    let candidates = from_env
        .filter(|s| !s.is_empty())
        .into_iter()
        .chain([config_filter, fallback.as_str()]);

    let mut rejected = Vec::new();
    for directives in candidates {
        match build_filter(directives) {
            Ok(filter) => return Ok(FilterSelection { filter, rejected }),
            Err(e) => rejected.push(e),
        }
    }
    Err(rejected
        .pop()
        .unwrap_or_else(|| anyhow::anyhow!("No log filter available")))
}

fn build_filter(directives: &str) -> Result<EnvFilter, anyhow::Error> {
    EnvFilter::try_new(directives)
        .map_err(|e| anyhow::anyhow!("Invalid log filter {directives:?}: {e}"))
}
