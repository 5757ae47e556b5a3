//! Config file resolution and loading.
//!
//! Looks for `~/.vigil/config.toml`, overridable with `VIGIL_CONFIG`. A
//! missing file is not an error; defaults cover the local dev layout.

use std::path::{Path, PathBuf};

use anyhow::Context;

use vigil_types::config::HubConfig;

pub fn load() -> anyhow::Result<HubConfig> {
    let path = match std::env::var_os("VIGIL_CONFIG") {
        Some(p) => PathBuf::from(p),
        None => {
            let Some(home) = dirs::home_dir() else {
                return Ok(HubConfig::default());
            };
            home.join(".vigil").join("config.toml")
        }
    };
    load_from(&path)
}

fn load_from(path: &Path) -> anyhow::Result<HubConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(HubConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:4600");
    }

    #[test]
    fn file_overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "scc_url = \"http://10.0.0.5:3001\"\n").unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.scc_url, "http://10.0.0.5:3001");
        assert_eq!(config.observer_url, "http://127.0.0.1:3002");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "step_timeout_secs = \"not a number\"\n").unwrap();

        assert!(load_from(&path).is_err());
    }
}
