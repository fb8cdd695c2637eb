use tracing_subscriber::EnvFilter;

/// Default level when `RUST_LOG` is unset.
pub fn default_directive(quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else {
        "info"
    }
}

/// Sets up the global subscriber. `RUST_LOG` overrides `quiet`.
pub fn init(quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet)));

    // A subscriber may already be installed, e.g. when embedded.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
