//! Diagnostic logging.
//!
//! ```bash
//! TRANSPOSE_LOG=debug transpose program.json
//! TRANSPOSE_LOG="transpose_codegen=debug" transpose program.json
//! ```
//!
//! The subscriber is only installed when `TRANSPOSE_LOG` (or `RUST_LOG`) is
//! set. Output goes to stderr so it never mixes with generated code on stdout.

use tracing_subscriber::EnvFilter;

const LOG_VAR: &str = "TRANSPOSE_LOG";

/// `TRANSPOSE_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_VAR) {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber if logging was requested.
pub fn init_tracing() {
    if std::env::var_os(LOG_VAR).is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .init();
}
