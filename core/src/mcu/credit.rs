//! Coin and service-credit accounting.
//!
//! The coprocessor keeps its own "phony" credit byte in shared memory. The
//! host maintains an authoritative counter elsewhere and the two are never
//! reconciled; the coin lockout decision below is taken from the phony one.

use super::map::{BANK_DIP_A, BANK_DIP_B, BANK_P1, BANK_P2, CREDITS_CHANGED, PHONY_CREDITS};
use super::{McuState, Step, lockout, mcu_read, mcu_write};
use crate::core::Bus;

/// Service credits are refused once the phony counter reaches this value.
pub const SERVICE_CEILING: u8 = 9;

/// Phony counter value at which the tracker asks for the coin lockout.
pub const LOCKOUT_THRESHOLD: u8 = 9;

/// One row of the pricing table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Price {
    pub coins: u8,
    pub credits: u8,
}

/// Pricing selected by two DIP bits per coin line.
pub const PRICING: [Price; 4] = [
    Price {
        coins: 1,
        credits: 1,
    },
    Price {
        coins: 1,
        credits: 2,
    },
    Price {
        coins: 2,
        credits: 1,
    },
    Price {
        coins: 3,
        credits: 1,
    },
];

/// Frame-to-frame movement of a signal's most significant bit.
///
/// The discriminant is the two-bit code `(now << 1) | !before`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Transition {
    /// Was set, now clear. The only transition that awards anything.
    Fell = 0,
    StayedClear = 1,
    StayedSet = 2,
    /// Was clear, now set.
    Rose = 3,
}

impl Transition {
    /// Compare bit 7 of the previous and current samples.
    pub fn msb(previous: u8, current: u8) -> Self {
        let code = ((current >> 7) << 1) | (!previous >> 7 & 1);
        Self::from_code(code)
    }

    pub fn from_code(code: u8) -> Self {
        match code & 0x03 {
            0 => Self::Fell,
            1 => Self::StayedClear,
            2 => Self::StayedSet,
            _ => Self::Rose,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Partial-coin accumulators for the two coin lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct CreditTracker {
    partial: [u8; 2],
}

impl CreditTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coins accepted on `line` (0 = A, 1 = B) toward the next award.
    pub fn partial(&self, line: usize) -> u8 {
        self.partial[line]
    }

    /// Count one coin on `line` and return the credits it earns, if any.
    fn coin(&mut self, line: usize, price: Price) -> Option<u8> {
        if price.coins <= 1 {
            return Some(price.credits);
        }
        self.partial[line] += 1;
        if self.partial[line] >= price.coins {
            self.partial[line] = 0;
            Some(price.credits)
        } else {
            None
        }
    }
}

fn award(bus: &mut dyn Bus, credits: u8) {
    let phony = mcu_read(bus, PHONY_CREDITS);
    mcu_write(bus, PHONY_CREDITS, phony.wrapping_add(credits));
    mcu_write(bus, CREDITS_CHANGED, 1);
}

pub fn run(state: &mut McuState, bus: &mut dyn Bus) -> Step {
    let dip = state.relay.bank(BANK_DIP_A as usize).current;

    for (line, bank) in [BANK_P1, BANK_P2].into_iter().enumerate() {
        let cache = state.relay.bank(bank as usize);
        if Transition::msb(cache.previous, cache.current) != Transition::Fell {
            continue;
        }
        let price = PRICING[((dip >> (2 * line)) & 0x03) as usize];
        if let Some(credits) = state.credits.coin(line, price) {
            log::trace!("coin line {line}: +{credits} credits");
            award(bus, credits);
        }
    }

    let service = state.relay.bank(BANK_DIP_B as usize);
    if Transition::msb(service.previous, service.current) == Transition::Fell {
        if mcu_read(bus, PHONY_CREDITS) >= SERVICE_CEILING {
            lockout::engage(state, bus);
        } else {
            award(bus, 1);
        }
    }

    if mcu_read(bus, PHONY_CREDITS) >= LOCKOUT_THRESHOLD {
        lockout::engage(state, bus);
    } else {
        lockout::disengage(state, bus);
    }
    Step::Continue
}
