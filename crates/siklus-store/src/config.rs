//! Data-directory resolution for the file-backed store.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SIKLUS_DATA_DIR";

/// Return the default siklus data directory.
///
/// Always uses XDG layout: `$XDG_DATA_HOME/siklus` or
/// `~/.local/share/siklus`, ignoring the platform-specific
/// `dirs::data_dir()` so paths stay stable across machines.
pub fn default_data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("siklus");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("share")
        .join("siklus")
}

/// Resolve the data directory: explicit override, then `SIKLUS_DATA_DIR`,
/// then the XDG default.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    default_data_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_takes_precedence() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/elsewhere")));
        assert_eq!(dir, PathBuf::from("/tmp/elsewhere"));
    }

    #[test]
    fn default_ends_with_siklus() {
        let dir = default_data_dir();
        assert!(dir.ends_with("siklus"));
    }
}
