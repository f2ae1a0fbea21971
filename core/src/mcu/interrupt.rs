use super::map::{IRQ_READY, IRQ_READY_MARKER};
use super::{McuState, Step, mcu_read};
use crate::core::Bus;
use crate::core::bus::OUTPUT_HOST_IRQ;

/// Interrupt gate: pulse the host interrupt line once per frame, but only
/// after the host has announced it is ready to take interrupts.
///
/// The line is driven low, high, then low again so that the host's
/// edge-sensitive input sees one complete edge regardless of where it was
/// left.
pub fn run(state: &mut McuState, bus: &mut dyn Bus) -> Step {
    if mcu_read(bus, IRQ_READY) != IRQ_READY_MARKER {
        return Step::Continue;
    }
    state.drive_output(bus, OUTPUT_HOST_IRQ, false);
    state.drive_output(bus, OUTPUT_HOST_IRQ, true);
    state.drive_output(bus, OUTPUT_HOST_IRQ, false);
    state.pulsed = true;
    Step::Continue
}
