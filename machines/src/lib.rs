pub mod cabinet;
pub mod registry;
pub mod rom_loader;

pub use cabinet::{CabinetConfig, CabinetSystem};
