//! Configuration system for sumi.
//!
//! Configuration is declarative TOML loaded from `~/.config/sumi/config.toml`
//! with sensible defaults for every field. Key bindings are overridden through
//! the `[keymap.<mode>]` tables (plus `[keymap.global]`), which the engine
//! feeds to the keymap's `load_from_config`; nothing in the configuration is
//! ever executed as code.
//!
//! # Example
//!
//! ```
//! use sumi::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.sequence_timeout_ms, 1000);
//! assert_eq!(config.scroll_margin, 5);
//! assert!(config.show_line_numbers);
//! ```
//!
//! A config file overriding a few settings and one binding:
//!
//! ```toml
//! sequence_timeout_ms = 750
//! create_backup = true
//!
//! [keymap.normal]
//! "J" = "move_down"
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// All configurable settings, with defaults via `Config::default()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Display line numbers in the editor view
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,

    /// Milliseconds before a pending key sequence expires
    #[serde(default = "default_sequence_timeout_ms")]
    pub sequence_timeout_ms: u64,

    /// Horizontal scroll margin in columns
    #[serde(default = "default_scroll_margin")]
    pub scroll_margin: usize,

    /// Spaces inserted per indent step
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Create `.bak` files before overwriting on save
    #[serde(default)]
    pub create_backup: bool,

    /// Key binding overrides: mode name ("normal", "insert", "command",
    /// "file_browser", or "global") to {key: action name}
    #[serde(default)]
    pub keymap: HashMap<String, HashMap<String, String>>,
}

fn default_show_line_numbers() -> bool {
    true
}

fn default_sequence_timeout_ms() -> u64 {
    1000
}

fn default_scroll_margin() -> usize {
    5
}

fn default_tab_size() -> usize {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_line_numbers: default_show_line_numbers(),
            sequence_timeout_ms: default_sequence_timeout_ms(),
            scroll_margin: default_scroll_margin(),
            tab_size: default_tab_size(),
            create_backup: false,
            keymap: HashMap::new(),
        }
    }
}

impl Config {
    /// Returns the path of the config file, `~/.config/sumi/config.toml`.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("sumi");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };
        if !config_path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|_| Self::default()),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file, creating the directory
    /// if needed.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, toml_string)?;
        Ok(())
    }
}
