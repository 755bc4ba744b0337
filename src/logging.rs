use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Diagnostics go to stderr so they never mix with the console summary.
///
/// Levels come from `BREACHCHECK_LOG` (e.g. `BREACHCHECK_LOG=breachcheck=debug`),
/// defaulting to `breachcheck=info`.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("BREACHCHECK_LOG")
            .unwrap_or_else(|_| EnvFilter::new("breachcheck=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
