use super::map::{CREEPER_OUTPUTS, CREEPER_SELECTORS};
use super::tables::{CREEPER_SENTINEL, CREEPER_TABLE_COUNT, CREEPER_TABLES};
use super::{McuState, Step, mcu_read, mcu_write};
use crate::core::Bus;

/// Rate apportioner: emits a fixed integer cycle whose average is the
/// selected number of tenths per frame.
///
/// The selector is only sampled when a cycle completes, so every emitted
/// cycle is whole and its mean is exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Creeper {
    pub selector: u8,
    pub cursor: u8,
}

impl Creeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the value under the cursor and advance. On reaching the
    /// sentinel, wrap and latch a fresh selector from `read_selector`.
    /// Selectors above 40 clamp to 40.
    pub fn step(&mut self, read_selector: impl FnOnce() -> u8) -> u8 {
        let table = &CREEPER_TABLES[self.selector as usize];
        let value = table[self.cursor as usize];
        self.cursor += 1;
        if table[self.cursor as usize] == CREEPER_SENTINEL {
            self.cursor = 0;
            self.selector = read_selector().min(CREEPER_TABLE_COUNT as u8 - 1);
        }
        value
    }
}

pub fn run<const N: usize>(state: &mut McuState, bus: &mut dyn Bus) -> Step {
    let selector_cell = CREEPER_SELECTORS + N as u16;
    let value = state.creepers[N].step(|| mcu_read(bus, selector_cell));
    mcu_write(bus, CREEPER_OUTPUTS + N as u16, value);
    Step::Continue
}
