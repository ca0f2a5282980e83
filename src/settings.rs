//! Settings file: game configuration plus key bindings, in TOML.
//!
//! Every section and field is optional:
//!
//! ```toml
//! [board]
//! width = 8
//! depth = 8
//!
//! [timing]
//! init_fall_step_seconds = 0.4
//!
//! [keys]
//! accelerate = "x"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{BoardConfig, GameConfig, TimingConfig};
use crate::input::{KeyBindings, KeyMap};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub board: BoardConfig,
    pub timing: TimingConfig,
    pub keys: KeyBindings,
}

impl Settings {
    /// Load from a TOML file, or defaults when no path is given.
    ///
    /// The result is validated: a returned `Settings` always yields a valid
    /// game configuration and key map.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = Self::from_toml_str(&text)
            .with_context(|| format!("loading settings from {}", path.display()))?;
        log::info!("settings loaded from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text).context("parsing settings")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if let Err(e) = self.game_config().validate() {
            log::warn!("rejected game configuration: {e}");
            return Err(e.into());
        }
        if let Err(e) = self.keys.resolve() {
            log::warn!("rejected key bindings: {e}");
            return Err(e.into());
        }
        Ok(())
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            board: self.board,
            timing: self.timing,
        }
    }

    pub fn key_map(&self) -> Result<KeyMap> {
        Ok(self.keys.resolve()?)
    }
}
