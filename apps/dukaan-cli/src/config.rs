//! # Configuration
//!
//! Data directory resolution.
//!
//! ## Resolution Order
//! 1. `--data-dir` command-line flag
//! 2. `DUKAAN_DATA_DIR` environment variable
//! 3. `<platform data dir>/dukaan` (e.g. `~/.local/share/dukaan` on Linux)

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DUKAAN_DATA_DIR";

/// Resolves the directory the JSON store lives in.
pub fn resolve_data_dir(cli_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = cli_override {
        return Ok(dir);
    }

    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    dirs::data_dir()
        .map(|base| base.join("dukaan"))
        .ok_or_else(|| {
            anyhow!("could not determine a data directory; pass --data-dir or set {DATA_DIR_ENV}")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/shop"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/shop"));
    }
}
