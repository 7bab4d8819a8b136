//! Path utilities for zenith.
//!
//! Configuration lives under `~/.zenith/`.

use std::path::PathBuf;

/// Returns the zenith home directory (`~/.zenith/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".zenith")
}

/// Returns the default config file path (`~/.zenith/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_under_zenith_home() {
        let config = default_config();
        assert!(config.starts_with(home_dir()));
        assert!(home_dir().to_string_lossy().contains(".zenith"));
    }
}
