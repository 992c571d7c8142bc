use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "skygraph_core=info,skygraph_cli=info";

/// Install the global subscriber. Logs go to stderr so stdout stays clean for
/// results. A non-empty `RUST_LOG` replaces the default `skygraph` levels.
pub fn init_tracing(json: bool) -> anyhow::Result<()> {
    let filter = env_filter(std::env::var("RUST_LOG").ok().as_deref())?;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .try_init()?;
    Ok(())
}

fn env_filter(rust_log: Option<&str>) -> anyhow::Result<EnvFilter> {
    let directives = match rust_log {
        Some(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_DIRECTIVES,
    };
    Ok(EnvFilter::try_new(directives)?)
}
