use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding per-target log directives.
pub const LOG_ENV: &str = "VERSO_LOG";
/// Directives used when `VERSO_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVES: &str = "verso_core=info,verso_strategies=info";

static INIT: Once = Once::new();

/// Install the global subscriber, reading directives from `VERSO_LOG`.
///
/// Format: `VERSO_LOG=verso_core=debug,verso_strategies=warn`. Output goes to
/// stderr so stdout stays reserved for JSON responses. Safe to call more than
/// once; only the first call has an effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
        install(filter);
    });
}

/// Install the global subscriber with explicit directives, ignoring `VERSO_LOG`.
///
/// Used by the CLI's `--verbose` flag. Shares the once-only guard with
/// [`init_tracing`].
pub fn init_tracing_with_filter(directives: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_new(directives)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
        install(filter);
    });
}

fn install(filter: EnvFilter) {
    // Another subscriber may already be installed by an embedding application.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_tracing();
        init_tracing();
        init_tracing_with_filter("verso_core=trace");
        tracing::info!("tracing initialised");
    }
}
