//! Logging initialization.
//!
//! Controlled by `MYGIT_LOG`, falling back to `RUST_LOG`, both in
//! `EnvFilter` syntax (e.g. `mygit=debug`). When neither is set only warnings
//! are shown. Events go to stderr so they never mix with command output.
//!
//! Only the binary calls [`init`]; the library just emits events.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "MYGIT_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // an already installed subscriber wins
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
