//! Abandoned command/response controllers.
//!
//! Three instances poll a command cell for a power-of-two coded request,
//! compute a value, publish it to an output cell and keep a private copy.
//! The host never issues these commands in shipping code, but the
//! consistency check below still runs every idle frame: with the diagnostic
//! gate armed, an output cell that no longer matches the private copy
//! poisons the coprocessor.

use super::map::{
    BANK_DIP_A, CREDIT_CTL_A, CREDIT_CTL_B, ControllerCells, DIAG_GATE, DIAG_GATE_MARKER, LEVEL_CTL,
};
use super::{McuState, Step, mcu_read, mcu_write};
use crate::core::Bus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerId {
    CreditA,
    CreditB,
    Level,
}

/// What a decoded command does to the controller's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Take the value from a table indexed by two DIP switch bits.
    FromDip,
    /// Add one, clamped at the variant's maximum.
    Increment,
    /// Subtract one. No clamp: zero wraps to 0xFF.
    Decrement,
    SetMax,
    /// Load a fixed value.
    Set(u8),
}

/// A command cell decoded once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Idle,
    Run(Operation),
    /// Nonzero but not one of the variant's codes. Acknowledged and dropped.
    Unknown(u8),
}

impl Command {
    pub fn decode(raw: u8, codes: &[(u8, Operation)]) -> Self {
        if raw == 0 {
            return Self::Idle;
        }
        codes
            .iter()
            .find(|(code, _)| *code == raw)
            .map_or(Self::Unknown(raw), |&(_, op)| Self::Run(op))
    }
}

/// Outcome of the idle-frame consistency check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Integrity {
    Ok,
    /// Output and private copy differ, but the diagnostic gate is closed.
    Mismatch,
    Poisoned,
}

impl Integrity {
    pub fn check(output: u8, cache: u8, gate_armed: bool) -> Self {
        match (output == cache, gate_armed) {
            (true, _) => Self::Ok,
            (false, false) => Self::Mismatch,
            (false, true) => Self::Poisoned,
        }
    }
}

/// Static description of one controller instance.
pub struct Variant {
    pub id: ControllerId,
    pub cells: ControllerCells,
    pub codes: &'static [(u8, Operation)],
    pub max: u8,
    /// Shift applied to DIP bank A before masking two bits.
    pub dip_shift: u8,
    pub dip_table: [u8; 4],
}

const CREDIT_CODES: &[(u8, Operation)] = &[
    (0x01, Operation::FromDip),
    (0x02, Operation::Increment),
    (0x04, Operation::Decrement),
    (0x08, Operation::SetMax),
];

// Level targets are carried over as-is; what levels 0x31 and 0x62-0x65
// meant to the host is not known.
const LEVEL_CODES: &[(u8, Operation)] = &[
    (0x01, Operation::Set(0x00)),
    (0x02, Operation::Increment),
    (0x04, Operation::Set(0x31)),
    (0x08, Operation::Set(0x62)),
    (0x10, Operation::Set(0x63)),
    (0x20, Operation::Set(0x64)),
    (0x40, Operation::Set(0x65)),
];

pub const VARIANTS: [Variant; 3] = [
    Variant {
        id: ControllerId::CreditA,
        cells: CREDIT_CTL_A,
        codes: CREDIT_CODES,
        max: 9,
        dip_shift: 4,
        dip_table: [1, 2, 3, 5],
    },
    Variant {
        id: ControllerId::CreditB,
        cells: CREDIT_CTL_B,
        codes: CREDIT_CODES,
        max: 9,
        dip_shift: 6,
        dip_table: [1, 2, 3, 5],
    },
    Variant {
        id: ControllerId::Level,
        cells: LEVEL_CTL,
        codes: LEVEL_CODES,
        max: 0x65,
        dip_shift: 0,
        dip_table: [0; 4],
    },
];

/// Private copy of a controller's last published value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controller {
    id: ControllerId,
    cache: u8,
}

impl Controller {
    pub fn all() -> [Self; 3] {
        VARIANTS.map(|v| Self { id: v.id, cache: 0 })
    }

    pub fn id(&self) -> ControllerId {
        self.id
    }

    pub fn cache(&self) -> u8 {
        self.cache
    }
}

fn apply(op: Operation, current: u8, variant: &Variant, dip: u8) -> u8 {
    match op {
        Operation::FromDip => variant.dip_table[((dip >> variant.dip_shift) & 0x03) as usize],
        Operation::Increment => current.saturating_add(1).min(variant.max),
        Operation::Decrement => current.wrapping_sub(1),
        Operation::SetMax => variant.max,
        Operation::Set(value) => value,
    }
}

pub fn run<const N: usize>(state: &mut McuState, bus: &mut dyn Bus) -> Step {
    let variant = &VARIANTS[N];
    let raw = mcu_read(bus, variant.cells.command);

    match Command::decode(raw, variant.codes) {
        Command::Idle => {
            let gate_armed = mcu_read(bus, DIAG_GATE) == DIAG_GATE_MARKER;
            let output = mcu_read(bus, variant.cells.output);
            match Integrity::check(output, state.controllers[N].cache, gate_armed) {
                Integrity::Ok => {}
                Integrity::Mismatch => {
                    log::trace!("{:?} output 0x{output:02X} drifted from cache", variant.id);
                }
                Integrity::Poisoned => return Step::Poisoned(variant.id),
            }
        }
        Command::Run(op) => {
            let dip = state.relay.bank(BANK_DIP_A as usize).current;
            let value = apply(op, state.controllers[N].cache, variant, dip);
            mcu_write(bus, variant.cells.output, value);
            state.controllers[N].cache = value;
            mcu_write(bus, variant.cells.command, 0);
        }
        Command::Unknown(raw) => {
            log::trace!("{:?} ignoring command 0x{raw:02X}", variant.id);
            mcu_write(bus, variant.cells.command, 0);
        }
    }
    Step::Continue
}
