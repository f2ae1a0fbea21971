use super::map::{RESET_COMMAND, WARM_RESET_MARKER};
use super::{McuState, Step, mcu_read};
use crate::core::Bus;

/// Reset watcher: ask the dispatcher for a warm restart when the host
/// writes the reset marker. The command cell is left as written.
pub fn run(_state: &mut McuState, bus: &mut dyn Bus) -> Step {
    if mcu_read(bus, RESET_COMMAND) == WARM_RESET_MARKER {
        Step::WarmReset
    } else {
        Step::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcu::TranslatorTables;
    use crate::mcu::test_bus::FlatBus;

    #[test]
    fn marker_requests_warm_reset() {
        let mut bus = FlatBus::new();
        let mut state = McuState::new(TranslatorTables::default());
        assert_eq!(run(&mut state, &mut bus), Step::Continue);
        bus.set(RESET_COMMAND, 0x4B);
        assert_eq!(run(&mut state, &mut bus), Step::Continue);
        bus.set(RESET_COMMAND, WARM_RESET_MARKER);
        assert_eq!(run(&mut state, &mut bus), Step::WarmReset);
        assert_eq!(bus.get(RESET_COMMAND), WARM_RESET_MARKER);
    }
}
