use super::map::{BANK_COUNT, BANK_MIRRORS, CABINET_MIRROR};
use super::{McuState, Step, mcu_read, mcu_write};
use crate::core::Bus;
use crate::core::bus::PORT_CABINET;

/// Last two samples of one input bank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BankCache {
    pub previous: u8,
    pub current: u8,
}

/// Input relay: mirror the raw inputs into shared memory every frame.
///
/// Each bank is also cached privately as a (previous, current) pair; the
/// credit tracker's edge detector reads these rather than the bus.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputRelay {
    banks: [BankCache; BANK_COUNT],
}

impl InputRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bank(&self, index: usize) -> BankCache {
        self.banks[index]
    }

    fn latch(&mut self, index: usize, value: u8) {
        let cache = &mut self.banks[index];
        cache.previous = cache.current;
        cache.current = value;
    }
}

pub fn run(state: &mut McuState, bus: &mut dyn Bus) -> Step {
    let cabinet = bus.io_read(PORT_CABINET);
    mcu_write(bus, CABINET_MIRROR, cabinet);

    for index in 0..BANK_COUNT {
        let value = mcu_read(bus, index as u16);
        mcu_write(bus, BANK_MIRRORS + index as u16, value);
        state.relay.latch(index, value);
    }
    Step::Continue
}
