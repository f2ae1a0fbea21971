use super::map::{LOCKOUT_CMD_DISENGAGE, LOCKOUT_CMD_ENGAGE, LOCKOUT_COMMAND};
use super::{McuState, Step, mcu_read};
use crate::core::Bus;
use crate::core::bus::OUTPUT_COIN_LOCKOUT;

/// Energize the coin lockout coil. Idempotent.
pub fn engage(state: &mut McuState, bus: &mut dyn Bus) {
    state.drive_output(bus, OUTPUT_COIN_LOCKOUT, true);
}

/// Release the coin lockout coil. Idempotent.
pub fn disengage(state: &mut McuState, bus: &mut dyn Bus) {
    state.drive_output(bus, OUTPUT_COIN_LOCKOUT, false);
}

pub fn is_engaged(state: &McuState) -> bool {
    (state.outputs & OUTPUT_COIN_LOCKOUT) != 0
}

/// Lockout arbiter, host half.
///
/// Runs right after the credit tracker has applied its own threshold, and
/// overrides it whenever the host command cell holds a recognized value.
/// When the two disagree the coil thrashes within the frame; the host
/// command always wins the final state.
pub fn run(state: &mut McuState, bus: &mut dyn Bus) -> Step {
    let before = is_engaged(state);
    match mcu_read(bus, LOCKOUT_COMMAND) {
        LOCKOUT_CMD_ENGAGE => engage(state, bus),
        LOCKOUT_CMD_DISENGAGE => disengage(state, bus),
        _ => {}
    }
    if before != is_engaged(state) {
        log::trace!("host overrode coin lockout: engaged={}", is_engaged(state));
    }
    Step::Continue
}
