use super::map::{EXTEND_PERIOD, EXTEND_SELECTOR};
use super::{McuState, Step, mcu_read, mcu_write};
use crate::core::Bus;

/// Extend rotator: a modulo-6 counter living in shared memory.
pub fn run(_state: &mut McuState, bus: &mut dyn Bus) -> Step {
    let next = mcu_read(bus, EXTEND_SELECTOR).wrapping_add(1);
    mcu_write(bus, EXTEND_SELECTOR, if next >= EXTEND_PERIOD { 0 } else { next });
    Step::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcu::TranslatorTables;
    use crate::mcu::test_bus::FlatBus;

    #[test]
    fn cycles_through_six_values() {
        let mut bus = FlatBus::new();
        let mut state = McuState::new(TranslatorTables::default());
        let mut seen = Vec::new();
        for _ in 0..8 {
            run(&mut state, &mut bus);
            seen.push(bus.get(EXTEND_SELECTOR));
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 0, 1, 2]);
    }

    #[test]
    fn out_of_range_value_wraps_to_zero() {
        let mut bus = FlatBus::new();
        let mut state = McuState::new(TranslatorTables::default());
        bus.set(EXTEND_SELECTOR, 0x80);
        run(&mut state, &mut bus);
        assert_eq!(bus.get(EXTEND_SELECTOR), 0);
    }
}
