//! Display configuration, persisted as JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const MIN_HEX_BYTES: usize = 32;
pub const MAX_HEX_BYTES: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bytes shown in the hex dump.
    #[serde(default = "default_hex_bytes")]
    pub hex_bytes: usize,
    /// Print inspections as JSON by default.
    #[serde(default)]
    pub json: bool,
    /// List lower-ranked signature matches under the best one.
    #[serde(default = "default_show_alternatives")]
    pub show_alternatives: bool,
}

fn default_hex_bytes() -> usize {
    MIN_HEX_BYTES
}
fn default_show_alternatives() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hex_bytes: default_hex_bytes(),
            json: false,
            show_alternatives: default_show_alternatives(),
        }
    }
}

impl AppConfig {
    /// Platform config directory: `~/.config/file-inspector/`
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("file-inspector")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Load from `path` (or the default location), or return defaults if the
    /// file doesn't exist.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map_or_else(Self::config_file, Path::to_path_buf);
        if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Persist to `path` (or the default location).
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<()> {
        let path = path.map_or_else(Self::config_file, Path::to_path_buf);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Update one key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "hex_bytes" => {
                let n: usize = value.parse()?;
                if !(MIN_HEX_BYTES..=MAX_HEX_BYTES).contains(&n) {
                    anyhow::bail!("hex_bytes must be between {MIN_HEX_BYTES} and {MAX_HEX_BYTES}");
                }
                self.hex_bytes = n;
            }
            "json" => self.json = value.parse()?,
            "show_alternatives" => self.show_alternatives = value.parse()?,
            _ => anyhow::bail!("Unknown config key: {key}"),
        }
        Ok(())
    }
}

/// Clamp a requested hex dump length to the supported range.
pub fn clamp_hex_bytes(n: usize) -> usize {
    n.clamp(MIN_HEX_BYTES, MAX_HEX_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{"json": true}"#).unwrap();
        assert_eq!(cfg.hex_bytes, 32);
        assert!(cfg.json);
        assert!(cfg.show_alternatives);
    }

    #[test]
    fn set_validates_keys_and_values() {
        let mut cfg = AppConfig::default();
        cfg.set("hex_bytes", "64").unwrap();
        cfg.set("show_alternatives", "false").unwrap();
        assert_eq!(cfg.hex_bytes, 64);
        assert!(!cfg.show_alternatives);

        assert!(cfg.set("hex_bytes", "4096").is_err());
        assert!(cfg.set("json", "maybe").is_err());
        assert!(cfg.set("colour", "red").is_err());
        assert_eq!(cfg.hex_bytes, 64);
    }

    #[test]
    fn hex_bytes_are_clamped() {
        assert_eq!(clamp_hex_bytes(0), 32);
        assert_eq!(clamp_hex_bytes(48), 48);
        assert_eq!(clamp_hex_bytes(1 << 20), 128);
    }
}
