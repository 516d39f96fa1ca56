//! Persisted presentation preference.
//!
//! The only thing stored is the theme, under the fixed key `"theme"` of a small JSON settings
//! file. Unknown keys in that file are preserved on every write.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::{QRError, QRResult};

pub const THEME_KEY: &str = "theme";

// Theme
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(QRError::InvalidTheme(s.to_string())),
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Settings store
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.config/smartqr/settings.json`, or `./smartqr-settings.json` without a home.
    pub fn default_path() -> PathBuf {
        match std::env::var_os("HOME") {
            Some(home) => Path::new(&home).join(".config").join("smartqr").join("settings.json"),
            None => PathBuf::from("smartqr-settings.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme. Dark only when the stored value is exactly `"dark"`; a missing file,
    /// missing key or unrecognized value reads as light.
    pub fn load_theme(&self) -> QRResult<Theme> {
        let settings = self.read()?;
        let theme = match settings.get(THEME_KEY) {
            Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|_| {
                warn!("Ignoring unknown theme {v} in {}", self.path.display());
                Theme::Light
            }),
            None => Theme::Light,
        };
        debug!("Loaded theme {theme}");
        Ok(theme)
    }

    pub fn save_theme(&self, theme: Theme) -> QRResult<()> {
        let mut settings = self.read()?;
        let value = serde_json::to_value(theme).map_err(|e| self.error("serialize", e))?;
        settings.insert(THEME_KEY.to_string(), value);
        self.write(&settings)?;
        debug!("Saved theme {theme} to {}", self.path.display());
        Ok(())
    }

    pub fn toggle_theme(&self) -> QRResult<Theme> {
        let theme = self.load_theme()?.toggle();
        self.save_theme(theme)?;
        Ok(theme)
    }

    fn read(&self) -> QRResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.error("read", e))?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        // Corrupt or non-object content is replaced on the next save
        Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Ignoring unreadable settings in {}: {e}", self.path.display());
            Map::new()
        }))
    }

    fn write(&self, settings: &Map<String, Value>) -> QRResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.error("create directory for", e))?;
        }
        let content =
            serde_json::to_string_pretty(settings).map_err(|e| self.error("serialize", e))?;
        fs::write(&self.path, content).map_err(|e| self.error("write", e))
    }

    fn error(&self, action: &str, e: impl Display) -> QRError {
        QRError::Settings(format!("Failed to {action} {}: {e}", self.path.display()))
    }
}
