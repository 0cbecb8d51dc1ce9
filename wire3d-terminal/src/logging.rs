/// File-backed tracing setup
///
/// Standard output is the drawing surface, so log records only go to a
/// file, and only when one is requested.
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install a plain-text subscriber writing to `path`. `RUST_LOG` overrides
/// the default `info` level.
pub fn init_file_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
