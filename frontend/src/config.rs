//! Host script configuration.
//!
//! A TOML file describing what the host game does to the board: operator
//! DIP settings, how many frames to run and a list of per-frame events.
//!
//! ```toml
//! frames = 120
//! tables = "roms/gatekeeper.zip"
//! tables_crc32 = 0x1A2B3C4D
//!
//! [dips]
//! dip_a = 0x02
//!
//! [[events]]
//! frame = 0
//! poke = { addr = 0xC00, value = 0x47 }
//!
//! [[events]]
//! frame = 10
//! press = "Coin A"
//! ```

use std::path::{Path, PathBuf};

use gatekeeper_machines::CabinetConfig;
use serde::Deserialize;

use crate::error::RunError;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptConfig {
    pub machine: Option<String>,
    pub frames: Option<u64>,
    /// Table ROM path, resolved like `--tables`.
    pub tables: Option<PathBuf>,
    /// Expected CRC32 of the table image. Unchecked when absent.
    pub tables_crc32: Option<u32>,
    pub dips: CabinetConfig,
    pub events: Vec<Event>,
}

/// Something the host does just before a given frame runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Event {
    pub frame: u64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Press a button by its input map name.
    Press(String),
    Release(String),
    /// Host write into shared memory.
    Poke { addr: u16, value: u8 },
}

/// Default location: `<config dir>/gatekeeper/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gatekeeper").join("config.toml"))
}

/// Load the script from `path`, or from the default location if it exists.
/// With neither, an empty script is returned.
pub fn load(path: Option<&Path>) -> Result<ScriptConfig, RunError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_path().filter(|p| p.is_file()) {
            Some(p) => p,
            None => {
                log::debug!("no config file; using defaults");
                return Ok(ScriptConfig::default());
            }
        },
    };

    let text = std::fs::read_to_string(&path).map_err(|source| RunError::ConfigRead {
        path: path.clone(),
        source,
    })?;
    let config = parse(&text).map_err(|source| RunError::ConfigParse {
        path: path.clone(),
        source,
    })?;
    log::info!(
        "loaded {} scripted event(s) from {}",
        config.events.len(),
        path.display()
    );
    Ok(config)
}

pub fn parse(text: &str) -> Result<ScriptConfig, toml::de::Error> {
    toml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_script() {
        let config = parse(
            r#"
            machine = "gatekeeper"
            frames = 30
            tables_crc32 = 0xCBF43926

            [dips]
            dip_a = 0x06
            dip_b = 0x01

            [[events]]
            frame = 0
            poke = { addr = 0xC00, value = 0x47 }

            [[events]]
            frame = 4
            press = "Coin A"

            [[events]]
            frame = 5
            release = "Coin A"
            "#,
        )
        .unwrap();

        assert_eq!(config.machine.as_deref(), Some("gatekeeper"));
        assert_eq!(config.frames, Some(30));
        assert_eq!(config.tables_crc32, Some(0xCBF4_3926));
        assert_eq!(config.dips.dip_a, 0x06);
        assert_eq!(config.dips.dip_b, 0x01);
        assert_eq!(
            config.events,
            vec![
                Event {
                    frame: 0,
                    action: Action::Poke {
                        addr: 0xC00,
                        value: 0x47
                    },
                },
                Event {
                    frame: 4,
                    action: Action::Press("Coin A".into()),
                },
                Event {
                    frame: 5,
                    action: Action::Release("Coin A".into()),
                },
            ]
        );
    }

    #[test]
    fn empty_script_uses_defaults() {
        let config = parse("").unwrap();
        assert!(config.machine.is_none());
        assert_eq!(config.dips, CabinetConfig::default());
        assert!(config.events.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("frame_count = 3").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("gatekeeper_config_missing.toml");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            load(Some(&path)),
            Err(RunError::ConfigRead { .. })
        ));
    }
}
