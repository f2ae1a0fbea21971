//! Beastie relay: compare each enemy's position against a player's and
//! publish direction codes and distances for the host.
//!
//! The collision path is defective and must stay that way. The Y-overlap
//! counter is cleared once per player sweep, not once per beastie, so a
//! beastie that overlaps only vertically "arms" a kill that a later beastie
//! overlapping only horizontally then fires. The sweep also stops at the
//! first kill, leaving the remaining beasties' outputs stale for the frame.

use super::map::{BEASTIE_COUNT, KILL_REQUESTED, PLAYERS, beastie_record};
use super::{McuState, Step, mcu_read, mcu_write};
use crate::core::Bus;

/// Distances strictly below this count as overlapping.
pub const OVERLAP_RANGE: u8 = 8;

/// Life stage byte of a beastie record. Bit 0 set means the beastie is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LifeStage {
    Gone = 0x00,
    Roaming = 0x01,
    Popped = 0x02,
    Shown = 0x03,
    Bubbled = 0x05,
}

impl LifeStage {
    pub fn from_byte(raw: u8) -> Option<Self> {
        match raw {
            0x00 => Some(Self::Gone),
            0x01 => Some(Self::Roaming),
            0x02 => Some(Self::Popped),
            0x03 => Some(Self::Shown),
            0x05 => Some(Self::Bubbled),
            _ => None,
        }
    }

    pub fn is_live(self) -> bool {
        is_live(self as u8)
    }
}

/// Liveness test used by the relay; it only ever looks at bit 0.
pub fn is_live(raw: u8) -> bool {
    raw & 0x01 != 0
}

/// Direction code written for each axis. Vertical codes read as
/// above/below, horizontal codes as right/left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Bearing {
    Centered = 0x00,
    AboveOrRight = 0x01,
    BelowOrLeft = 0x02,
}

impl Bearing {
    /// Bearing of `beastie` relative to `player` and the absolute distance.
    pub fn compare(player: u8, beastie: u8) -> (Self, u8) {
        match beastie.cmp(&player) {
            std::cmp::Ordering::Equal => (Self::Centered, 0),
            std::cmp::Ordering::Greater => (Self::AboveOrRight, beastie - player),
            std::cmp::Ordering::Less => (Self::BelowOrLeft, player - beastie),
        }
    }

    pub fn from_byte(raw: u8) -> Option<Self> {
        match raw {
            0x00 => Some(Self::Centered),
            0x01 => Some(Self::AboveOrRight),
            0x02 => Some(Self::BelowOrLeft),
            _ => None,
        }
    }
}

/// Per-player sweep state, rebuilt every frame the player is live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BeastieRelay {
    /// Player position cached at the start of the sweep (y, x).
    pub player: (u8, u8),
    pub y_overlaps: u8,
    /// Beastie index that triggered a kill request this frame.
    pub killed_by: Option<u8>,
}

impl BeastieRelay {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn run<const P: usize>(state: &mut McuState, bus: &mut dyn Bus) -> Step {
    let cells = PLAYERS[P];
    if !is_live(mcu_read(bus, cells.liveness)) {
        return Step::Continue;
    }

    let relay = &mut state.beasties[P];
    relay.player = (mcu_read(bus, cells.y), mcu_read(bus, cells.x));
    relay.y_overlaps = 0;
    relay.killed_by = None;
    let (player_y, player_x) = relay.player;

    for index in 0..BEASTIE_COUNT {
        let record = beastie_record(index);
        if !is_live(mcu_read(bus, record)) {
            continue;
        }
        let out = cells.beastie_output(index);

        let (code, distance) = Bearing::compare(player_y, mcu_read(bus, record + 1));
        mcu_write(bus, out.vertical_code, code as u8);
        mcu_write(bus, out.vertical_distance, distance);
        if distance < OVERLAP_RANGE {
            relay.y_overlaps = relay.y_overlaps.wrapping_add(1);
        }

        let (code, distance) = Bearing::compare(player_x, mcu_read(bus, record + 2));
        mcu_write(bus, out.horizontal_code, code as u8);
        mcu_write(bus, out.horizontal_distance, distance);

        if distance < OVERLAP_RANGE
            && relay.y_overlaps != 0
            && is_live(mcu_read(bus, cells.liveness))
        {
            mcu_write(bus, cells.kill_request, KILL_REQUESTED);
            mcu_write(bus, cells.kill_cause, index as u8);
            relay.killed_by = Some(index as u8);
            log::trace!("player {} kill request from beastie {index}", P + 1);
            break;
        }
    }
    Step::Continue
}
