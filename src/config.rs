use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub default_sort: String,
    pub max_rows: usize,
    pub name_width: usize,
    pub source: String,
    pub proc_root: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 2000,
            default_sort: "cpu".to_string(),
            max_rows: 30,
            name_width: 22,
            source: "auto".to_string(),
            proc_root: PathBuf::from("/proc"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub sort_cpu: String,
    pub sort_memory: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            sort_cpu: "c".to_string(),
            sort_memory: "m".to_string(),
        }
    }
}

/// Parse a keybind name from the config file: a single character or one of
/// the named keys.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "space" => Some(KeyCode::Char(' ')),
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        _ => None,
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ticktop").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(config) => config.sanitized(),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "invalid config; using defaults");
                Config::default()
            }
        },
        Err(_) => Config::default(),
    }
}

impl Config {
    /// Replace values the tick loop cannot honor. `--interval` rejects zero at
    /// parse time; the file gets the same rule here.
    fn sanitized(mut self) -> Self {
        if self.general.refresh_rate_ms == 0 {
            let fallback = GeneralConfig::default().refresh_rate_ms;
            tracing::warn!(fallback, "refresh_rate_ms must be at least 1");
            self.general.refresh_rate_ms = fallback;
        }
        self
    }
}
