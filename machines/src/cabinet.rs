//! The cabinet board: coprocessor, raw input banks, shared RAM and the
//! output latch, wired onto one 12-bit bus.
//!
//! Memory map (both bus masters see the same decode):
//!
//! | Range       | Device                                    |
//! |-------------|-------------------------------------------|
//! | 0x000-0x003 | Input banks (P1, P2, DIP A, DIP B), RO    |
//! | 0x004-0xBFF | Unmapped (reads 0xFF, writes dropped)     |
//! | 0xC00-0xFFF | Shared RAM (1KB)                          |
//!
//! Port 0 reads the cabinet switches; port 1 is the output latch
//! (bit 0 host IRQ, bit 1 coin lockout).

use gatekeeper_core::core::bus::{
    self, INPUT_RANGE, PORT_CABINET, PORT_OUTPUT, SHARED_RANGE,
};
use gatekeeper_core::core::machine::{InputButton, Machine};
use gatekeeper_core::core::{Bus, BusError, BusMaster};
use gatekeeper_core::device::{InputDevice, OutputLatch, SharedRam};
use gatekeeper_core::mcu::map::{BANK_DIP_A, BANK_DIP_B, BANK_P1, BANK_P2};
use gatekeeper_core::mcu::{Mcu, TickOutcome, TranslatorTables};
use serde::{Deserialize, Serialize};

use crate::registry::MachineEntry;
use crate::rom_loader::{self, RomLoadError, RomSet};

/// DIP B bit 7 is the service button, not a switch.
const SERVICE_BIT: u8 = 7;
const DIP_B_SWITCH_MASK: u8 = !(1 << SERVICE_BIT);

// ---------------------------------------------------------------------------
// Input definitions
// ---------------------------------------------------------------------------

pub const INPUT_P1_UP: u8 = 0;
pub const INPUT_P1_DOWN: u8 = 1;
pub const INPUT_P1_LEFT: u8 = 2;
pub const INPUT_P1_RIGHT: u8 = 3;
pub const INPUT_P1_FIRE: u8 = 4;
pub const INPUT_P1_START: u8 = 5;
pub const INPUT_P2_UP: u8 = 6;
pub const INPUT_P2_DOWN: u8 = 7;
pub const INPUT_P2_LEFT: u8 = 8;
pub const INPUT_P2_RIGHT: u8 = 9;
pub const INPUT_P2_FIRE: u8 = 10;
pub const INPUT_P2_START: u8 = 11;
pub const INPUT_COIN_A: u8 = 12;
pub const INPUT_COIN_B: u8 = 13;
pub const INPUT_SERVICE: u8 = 14;
pub const INPUT_TILT: u8 = 15;
pub const INPUT_COIN_DOOR: u8 = 16;

#[rustfmt::skip]
const CABINET_INPUT_MAP: &[InputButton] = &[
    InputButton { id: INPUT_P1_UP, name: "P1 Up" },
    InputButton { id: INPUT_P1_DOWN, name: "P1 Down" },
    InputButton { id: INPUT_P1_LEFT, name: "P1 Left" },
    InputButton { id: INPUT_P1_RIGHT, name: "P1 Right" },
    InputButton { id: INPUT_P1_FIRE, name: "P1 Fire" },
    InputButton { id: INPUT_P1_START, name: "P1 Start" },
    InputButton { id: INPUT_P2_UP, name: "P2 Up" },
    InputButton { id: INPUT_P2_DOWN, name: "P2 Down" },
    InputButton { id: INPUT_P2_LEFT, name: "P2 Left" },
    InputButton { id: INPUT_P2_RIGHT, name: "P2 Right" },
    InputButton { id: INPUT_P2_FIRE, name: "P2 Fire" },
    InputButton { id: INPUT_P2_START, name: "P2 Start" },
    InputButton { id: INPUT_COIN_A, name: "Coin A" },
    InputButton { id: INPUT_COIN_B, name: "Coin B" },
    InputButton { id: INPUT_SERVICE, name: "Service" },
    InputButton { id: INPUT_TILT, name: "Tilt" },
    InputButton { id: INPUT_COIN_DOOR, name: "Coin Door" },
];

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Operator settings for the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CabinetConfig {
    /// Bits 1:0 coin A price, 3:2 coin B price, 5:4 and 7:6 the credit
    /// controllers' DIP selections.
    pub dip_a: u8,
    /// Bit 7 is wired to the service button and is ignored here.
    pub dip_b: u8,
}

// ---------------------------------------------------------------------------
// CabinetBoard: everything on the bus except the coprocessor
// ---------------------------------------------------------------------------

pub struct CabinetBoard {
    pub inputs: InputDevice,
    pub ram: SharedRam,
    pub latch: OutputLatch,
}

impl CabinetBoard {
    pub fn new() -> Self {
        Self {
            inputs: InputDevice::new(),
            ram: SharedRam::new(),
            latch: OutputLatch::new(),
        }
    }

    /// Checked read: fails on unmapped addresses instead of floating the bus.
    pub fn try_read(&self, addr: u16) -> Result<u8, BusError> {
        if bus::classify(addr)? {
            Ok(self.ram.read(addr - SHARED_RANGE.start()))
        } else {
            Ok(self.inputs.read(addr))
        }
    }

    /// Checked write: fails on unmapped addresses and on the input banks.
    pub fn try_write(&mut self, addr: u16, data: u8) -> Result<(), BusError> {
        if bus::classify(addr)? {
            self.ram.write(addr - SHARED_RANGE.start(), data);
            Ok(())
        } else {
            Err(BusError::ReadOnly(addr))
        }
    }

    fn apply_config(&mut self, config: &CabinetConfig) {
        self.inputs.set_bank(BANK_DIP_A, config.dip_a);
        let service = self.inputs.read(BANK_DIP_B) & !DIP_B_SWITCH_MASK;
        self.inputs
            .set_bank(BANK_DIP_B, (config.dip_b & DIP_B_SWITCH_MASK) | service);
    }
}

impl Default for CabinetBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for CabinetBoard {
    fn read(&mut self, master: BusMaster, addr: u16) -> u8 {
        match self.try_read(addr) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("{master:?} read: {e}");
                0xFF
            }
        }
    }

    fn write(&mut self, master: BusMaster, addr: u16, data: u8) {
        if INPUT_RANGE.contains(&addr) {
            log::trace!("{master:?} write to input bank 0x{addr:03X} ignored");
            return;
        }
        if let Err(e) = self.try_write(addr, data) {
            log::warn!("{master:?} write of 0x{data:02X}: {e}");
        }
    }

    fn io_read(&mut self, port: u8) -> u8 {
        match port {
            PORT_CABINET => self.inputs.cabinet(),
            _ => 0xFF,
        }
    }

    fn io_write(&mut self, port: u8, data: u8) {
        if port == PORT_OUTPUT {
            let was_engaged = self.latch.lockout_engaged();
            self.latch.write(data);
            if was_engaged != self.latch.lockout_engaged() {
                log::debug!(
                    "coin lockout {}",
                    if was_engaged { "released" } else { "engaged" }
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// CabinetSystem
// ---------------------------------------------------------------------------

/// Complete board as the host game sees it.
pub struct CabinetSystem {
    mcu: Mcu,
    board: CabinetBoard,
    config: CabinetConfig,
}

impl CabinetSystem {
    pub fn new(config: CabinetConfig) -> Self {
        Self::with_tables(TranslatorTables::default(), config)
    }

    pub fn with_tables(tables: TranslatorTables, config: CabinetConfig) -> Self {
        let mut board = CabinetBoard::new();
        board.apply_config(&config);
        Self {
            mcu: Mcu::with_tables(tables),
            board,
            config,
        }
    }

    /// Build from a table ROM set, falling back to the built-in tables.
    pub fn from_rom_set(
        rom_set: Option<&RomSet>,
        config: CabinetConfig,
    ) -> Result<Self, RomLoadError> {
        let tables = match rom_set {
            Some(set) => rom_loader::load_translator_tables(set)?,
            None => TranslatorTables::default(),
        };
        Ok(Self::with_tables(tables, config))
    }

    pub fn config(&self) -> CabinetConfig {
        self.config
    }

    pub fn set_config(&mut self, config: CabinetConfig) {
        self.config = config;
        self.board.apply_config(&config);
    }

    pub fn mcu(&self) -> &Mcu {
        &self.mcu
    }

    pub fn board(&self) -> &CabinetBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut CabinetBoard {
        &mut self.board
    }

    /// Run one coprocessor frame and report how it ended.
    pub fn step_frame(&mut self) -> TickOutcome {
        let outcome = self.mcu.tick(&mut self.board);
        if let TickOutcome::Poisoned(id) = outcome {
            log::warn!("{id:?} controller failed its integrity check; coprocessor halted");
        }
        outcome
    }

    pub fn lockout_engaged(&self) -> bool {
        self.board.latch.lockout_engaged()
    }
}

impl Default for CabinetSystem {
    fn default() -> Self {
        Self::new(CabinetConfig::default())
    }
}

impl Machine for CabinetSystem {
    fn run_frame(&mut self) {
        self.step_frame();
    }

    fn set_input(&mut self, button: u8, pressed: bool) {
        let inputs = &mut self.board.inputs;
        match button {
            INPUT_P1_UP..=INPUT_P1_START => inputs.set_bank_bit(BANK_P1, button, pressed),
            INPUT_P2_UP..=INPUT_P2_START => {
                inputs.set_bank_bit(BANK_P2, button - INPUT_P2_UP, pressed)
            }
            INPUT_COIN_A => inputs.set_bank_bit(BANK_P1, 7, pressed),
            INPUT_COIN_B => inputs.set_bank_bit(BANK_P2, 7, pressed),
            INPUT_SERVICE => inputs.set_bank_bit(BANK_DIP_B, SERVICE_BIT, pressed),
            INPUT_TILT => inputs.set_cabinet_bit(0, pressed),
            INPUT_COIN_DOOR => inputs.set_cabinet_bit(1, pressed),
            _ => {}
        }
    }

    fn input_map(&self) -> &[InputButton] {
        CABINET_INPUT_MAP
    }

    fn reset(&mut self) {
        self.mcu.cold_reset();
        self.board.ram.clear();
        self.board.latch.reset();
        self.board.inputs.release_all();
        self.board.apply_config(&self.config);
    }

    fn host_read(&mut self, addr: u16) -> u8 {
        self.board.read(BusMaster::Host, addr)
    }

    fn host_write(&mut self, addr: u16, data: u8) {
        self.board.write(BusMaster::Host, addr, data);
    }

    fn take_host_irqs(&mut self) -> u32 {
        self.board.latch.take_irq_edges()
    }

    fn shared_memory(&self) -> &[u8] {
        self.board.ram.snapshot()
    }

    fn set_dip_switches(&mut self, banks: &[u8]) {
        let mut config = self.config;
        if let Some(&a) = banks.first() {
            config.dip_a = a;
        }
        if let Some(&b) = banks.get(1) {
            config.dip_b = b;
        }
        self.set_config(config);
    }

    fn is_halted(&self) -> bool {
        self.mcu.poisoned().is_some()
    }
}

// ---------------------------------------------------------------------------
// Machine registry
// ---------------------------------------------------------------------------

fn create_machine(rom_set: Option<&RomSet>) -> Result<Box<dyn Machine>, RomLoadError> {
    let sys = CabinetSystem::from_rom_set(rom_set, CabinetConfig::default())?;
    Ok(Box::new(sys))
}

inventory::submit! {
    MachineEntry::new("gatekeeper", "gatekeeper", create_machine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_sets_dip_banks_without_service_bit() {
        let sys = CabinetSystem::new(CabinetConfig {
            dip_a: 0x5A,
            dip_b: 0xFF,
        });
        assert_eq!(sys.board().inputs.read(BANK_DIP_A), 0x5A);
        assert_eq!(sys.board().inputs.read(BANK_DIP_B), 0x7F);
    }

    #[test]
    fn service_button_survives_dip_change() {
        let mut sys = CabinetSystem::default();
        sys.set_input(INPUT_SERVICE, true);
        sys.set_dip_switches(&[0x00, 0x01]);
        assert_eq!(sys.board().inputs.read(BANK_DIP_B), 0x81);
    }

    #[test]
    fn buttons_map_to_bank_bits() {
        let mut sys = CabinetSystem::default();
        sys.set_input(INPUT_P1_FIRE, true);
        sys.set_input(INPUT_P2_RIGHT, true);
        sys.set_input(INPUT_COIN_B, true);
        sys.set_input(INPUT_TILT, true);
        assert_eq!(sys.board().inputs.read(BANK_P1), 0x10);
        assert_eq!(sys.board().inputs.read(BANK_P2), 0x88);
        assert_eq!(sys.board().inputs.cabinet(), 0x01);

        sys.set_input(INPUT_P2_RIGHT, false);
        assert_eq!(sys.board().inputs.read(BANK_P2), 0x80);
    }

    #[test]
    fn checked_access_reports_errors() {
        let mut board = CabinetBoard::new();
        assert_eq!(board.try_read(0x800), Err(BusError::AddressOutOfRange(0x800)));
        assert_eq!(board.try_write(0x001, 0x12), Err(BusError::ReadOnly(0x001)));
        assert_eq!(board.try_write(0xC40, 0x12), Ok(()));
        assert_eq!(board.try_read(0xC40), Ok(0x12));
    }

    #[test]
    fn unmapped_reads_float_high() {
        let mut board = CabinetBoard::new();
        assert_eq!(board.read(BusMaster::Host, 0x100), 0xFF);
        board.write(BusMaster::Host, 0x100, 0x00);
        assert_eq!(board.read(BusMaster::Mcu, 0x100), 0xFF);
        assert_eq!(board.io_read(7), 0xFF);
    }

    #[test]
    fn host_cannot_write_input_banks() {
        let mut sys = CabinetSystem::new(CabinetConfig {
            dip_a: 0x03,
            dip_b: 0,
        });
        sys.host_write(BANK_DIP_A, 0x00);
        assert_eq!(sys.host_read(BANK_DIP_A), 0x03);
    }

    #[test]
    fn registry_lists_board() {
        let entry = crate::registry::find("gatekeeper").unwrap();
        let machine = (entry.create)(None).unwrap();
        assert_eq!(machine.input_map().len(), 17);
    }
}
