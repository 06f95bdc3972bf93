use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human output for terminals.
    #[default]
    Compact,
    /// JSON lines, for hosts that ship logs to a collector.
    Json,
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "storefront_cart=debug,info"
    } else {
        "storefront_cart=info"
    }
}

/// Installs the global subscriber. Logs go to stderr so the printed cart stays clean on stdout.
pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(fmt_layer.compact()).init(),
        LogFormat::Json => registry.with(fmt_layer.json()).init(),
    }
}
