//! Quill command-line front end.
//!
//! The binary (`quill`) parses arguments by hand and dispatches to the
//! handlers in [`commands`]. Everything a handler prints is built by a pure
//! function first so it can be tested without a terminal.

pub mod commands;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber if logging was requested.
///
/// The filter comes from `QUILL_LOG`, falling back to `RUST_LOG`; with
/// neither set nothing is installed. `QUILL_LOG_TREE=1` renders spans as an
/// indented tree instead of flat lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Some(directives) = std::env::var("QUILL_LOG")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
        else {
            return;
        };
        let filter = EnvFilter::new(directives);

        if std::env::var("QUILL_LOG_TREE").is_ok_and(|value| value == "1") {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
