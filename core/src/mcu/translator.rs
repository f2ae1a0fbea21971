use super::map::{TRANSLATOR_ARMED, TRANSLATOR_DONE, TRANSLATORS};
use super::{McuState, Step, mcu_read, mcu_write};
use crate::core::Bus;

/// Translator: one indirect table lookup per arming.
///
/// The host arms a slot by writing its table selector, index and
/// destination offset, then setting the status cell to armed. The result
/// lands at the slot's fixed output base plus the offset, and the status
/// flips to done so that the slot cannot fire again until re-armed.
pub fn run<const N: usize>(state: &mut McuState, bus: &mut dyn Bus) -> Step {
    let cells = TRANSLATORS[N];
    if mcu_read(bus, cells.status) != TRANSLATOR_ARMED {
        return Step::Continue;
    }
    let selector = mcu_read(bus, cells.table);
    let index = mcu_read(bus, cells.index);
    let value = state.tables.lookup(selector, index);
    let offset = mcu_read(bus, cells.offset);
    mcu_write(bus, cells.output_base + offset as u16, value);
    mcu_write(bus, cells.status, TRANSLATOR_DONE);
    Step::Continue
}
