//! File-backed logging setup.
//!
//! The TUI owns the terminal, so log output goes to a file instead of
//! stderr. `RUST_LOG` picks the filter and defaults to `info`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Route the `log` macros to the given file.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
