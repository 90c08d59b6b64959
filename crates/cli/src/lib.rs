use std::env;
use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::{anyhow, Context, Result};

pub mod commands;

static TRACING_INIT: Once = Once::new();

/// Install a stderr tracing subscriber, only when `RUST_LOG` is set.
///
/// Stdout stays reserved for diagnostics. Enable with e.g.
/// `RUST_LOG=widecopy_core=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}

/// Resolve a graph document path against the current directory and make
/// sure it exists.
pub fn resolve_graph_path(path: &str) -> Result<PathBuf> {
    let input = Path::new(path);
    let abs = if input.is_absolute() {
        input.to_path_buf()
    } else {
        env::current_dir().context("Failed to get current directory")?.join(input)
    };
    if !abs.is_file() {
        return Err(anyhow!("Type graph does not exist: {}", abs.display()));
    }
    Ok(abs)
}
