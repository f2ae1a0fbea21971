use super::map::{CLOCK_ACTIVE, CLOCK_COMPLETE, CLOCK_COUNT_HI, CLOCK_COUNT_LO};
use super::{McuState, Step, mcu_read, mcu_write};
use crate::core::Bus;

/// Clock countdown: a host-started 16-bit frame timer.
///
/// While active, the count drops by one per frame. The frame it reaches
/// zero, the active flag clears and the one-shot complete flag is raised.
/// A count of zero when started wraps to 0xFFFF.
pub fn run(_state: &mut McuState, bus: &mut dyn Bus) -> Step {
    if mcu_read(bus, CLOCK_ACTIVE) == 0 {
        return Step::Continue;
    }
    let count = u16::from_le_bytes([mcu_read(bus, CLOCK_COUNT_LO), mcu_read(bus, CLOCK_COUNT_HI)])
        .wrapping_sub(1);
    let [lo, hi] = count.to_le_bytes();
    mcu_write(bus, CLOCK_COUNT_LO, lo);
    mcu_write(bus, CLOCK_COUNT_HI, hi);
    if count == 0 {
        mcu_write(bus, CLOCK_ACTIVE, 0);
        mcu_write(bus, CLOCK_COMPLETE, 1);
    }
    Step::Continue
}
