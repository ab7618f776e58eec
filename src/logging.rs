//! Setup for the application logging.
//!
//! Log records go to standard output with the level taken from the
//! `LOG_LEVEL` setting (`off`, `error`, `warn`, `info`, `debug`, `trace`).
//! Request and upstream logs never include header values, so bearer tokens,
//! refresh tokens and the shared secret stay out of the output.
use std::sync::Once;

use tracing::info;
use tracing::level_filters::LevelFilter;

static INIT: Once = Once::new();

pub fn setup(level: LevelFilter) {
    if level == LevelFilter::OFF {
        return;
    }

    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(true)
            .init();

        info!("Logging initialized");
    });
}
