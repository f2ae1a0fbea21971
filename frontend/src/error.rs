use std::path::PathBuf;

use gatekeeper_core::core::BusError;
use gatekeeper_machines::rom_loader::RomLoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("unknown machine '{name}' (available: {available})")]
    UnknownMachine { name: String, available: String },

    #[error(transparent)]
    Rom(#[from] RomLoadError),

    #[error("reading config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("event at frame {frame}: unknown button '{name}'")]
    UnknownButton { frame: u64, name: String },

    #[error("event at frame {frame}: poke rejected: {source}")]
    BadPoke { frame: u64, source: BusError },

    #[error("encoding JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
