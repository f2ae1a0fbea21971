use super::map::{
    MISCHIEF_CREDITS, MISCHIEF_ENABLE, MISCHIEF_ENABLE_MARKER, MISCHIEF_LEVEL, PHONY_CREDITS,
};
use super::{McuState, Step, mcu_read, mcu_write};
use crate::core::Bus;

const LEVEL_CONTROLLER: usize = 2;

/// Credit mischief: with the enable cell set and the level controller's
/// cached level at the trigger value, force the phony credit counter.
pub fn run(state: &mut McuState, bus: &mut dyn Bus) -> Step {
    if mcu_read(bus, MISCHIEF_ENABLE) == MISCHIEF_ENABLE_MARKER
        && state.controllers[LEVEL_CONTROLLER].cache() == MISCHIEF_LEVEL
    {
        mcu_write(bus, PHONY_CREDITS, MISCHIEF_CREDITS);
    }
    Step::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcu::map::LEVEL_CTL;
    use crate::mcu::test_bus::FlatBus;
    use crate::mcu::{TranslatorTables, controller};

    /// Walk the level controller up to `level` with increment commands.
    fn set_level(state: &mut McuState, bus: &mut FlatBus, level: u8) {
        for _ in 0..level {
            bus.set(LEVEL_CTL.command, 0x02);
            controller::run::<2>(state, bus);
        }
    }

    #[test]
    fn both_conditions_overwrite_credits() {
        let mut bus = FlatBus::new();
        let mut state = McuState::new(TranslatorTables::default());
        set_level(&mut state, &mut bus, MISCHIEF_LEVEL);
        bus.set(MISCHIEF_ENABLE, MISCHIEF_ENABLE_MARKER);
        bus.set(PHONY_CREDITS, 3);
        run(&mut state, &mut bus);
        assert_eq!(bus.get(PHONY_CREDITS), 42);
    }

    #[test]
    fn enable_alone_is_not_enough() {
        let mut bus = FlatBus::new();
        let mut state = McuState::new(TranslatorTables::default());
        set_level(&mut state, &mut bus, MISCHIEF_LEVEL - 1);
        bus.set(MISCHIEF_ENABLE, MISCHIEF_ENABLE_MARKER);
        bus.set(PHONY_CREDITS, 3);
        run(&mut state, &mut bus);
        assert_eq!(bus.get(PHONY_CREDITS), 3);
    }

    #[test]
    fn level_output_cell_is_not_what_counts() {
        let mut bus = FlatBus::new();
        let mut state = McuState::new(TranslatorTables::default());
        bus.set(LEVEL_CTL.output, MISCHIEF_LEVEL);
        bus.set(MISCHIEF_ENABLE, MISCHIEF_ENABLE_MARKER);
        run(&mut state, &mut bus);
        assert_eq!(bus.get(PHONY_CREDITS), 0);
    }
}
