//! Board registry for front-end discovery.
//!
//! Each board self-registers via [`inventory::submit!`] with a
//! [`MachineEntry`] holding its CLI name, its table ROM set name and a
//! factory. The front-end finds boards at runtime without a central list.

use gatekeeper_core::core::machine::Machine;

use crate::rom_loader::{RomLoadError, RomSet};

/// Board factory. `None` means no table ROM was supplied and the built-in
/// tables are used.
pub type CreateFn = fn(Option<&RomSet>) -> Result<Box<dyn Machine>, RomLoadError>;

pub struct MachineEntry {
    /// CLI name used to select this board.
    pub name: &'static str,
    /// ROM set name used for archive lookup in a rompath directory.
    pub rom_name: &'static str,
    pub create: CreateFn,
}

impl MachineEntry {
    pub const fn new(name: &'static str, rom_name: &'static str, create: CreateFn) -> Self {
        Self {
            name,
            rom_name,
            create,
        }
    }
}

inventory::collect!(MachineEntry);

/// All registered boards, sorted by name.
pub fn all() -> Vec<&'static MachineEntry> {
    let mut entries: Vec<_> = inventory::iter::<MachineEntry>.into_iter().collect();
    entries.sort_by_key(|e| e.name);
    entries
}

pub fn find(name: &str) -> Option<&'static MachineEntry> {
    inventory::iter::<MachineEntry>
        .into_iter()
        .find(|e| e.name == name)
}
