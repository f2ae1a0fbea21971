//! The cabinet coprocessor: a fixed per-frame dispatch loop over a set of
//! small stateful subsystems that talk to the host through shared memory.
//!
//! One call to [`Mcu::tick`] is one complete, uninterrupted frame. The units
//! in [`FRAME_SCHEDULE`] run in order against the bus; none of them blocks.
//! A unit may end the frame early only by reporting a poisoned controller,
//! after which the coprocessor stops servicing frames until a cold reset.

pub mod beastie;
pub mod clock;
pub mod controller;
pub mod creeper;
pub mod credit;
pub mod extend;
pub mod input_relay;
pub mod interrupt;
pub mod lockout;
pub mod map;
pub mod mischief;
pub mod reset;
pub mod tables;
pub mod translator;

use crate::core::bus::PORT_OUTPUT;
use crate::core::{Bus, BusMaster};

pub use beastie::BeastieRelay;
pub use controller::{ControllerId, Integrity};
pub use creeper::Creeper;
pub use credit::{CreditTracker, Transition};
pub use input_relay::InputRelay;
pub use tables::TranslatorTables;

/// Cycles spent in the timing pad when the host has not set the delay marker.
/// The pad has no functional effect; it is only accounted for in [`McuStats`].
pub const DELAY_PAD_CYCLES: u64 = 0x0400;

/// Result of one unit within a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Re-initialize all coprocessor state before the next unit runs.
    WarmReset,
    /// A controller integrity check tripped. Terminal until cold reset.
    Poisoned(ControllerId),
}

/// Result of a whole frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Completed,
    /// This frame tripped the poison check; remaining units did not run.
    Poisoned(ControllerId),
    /// An earlier frame was poisoned; nothing ran.
    Halted,
}

/// One entry of the frame schedule.
#[derive(Clone, Copy, Debug)]
pub struct Unit {
    pub name: &'static str,
    pub run: fn(&mut McuState, &mut dyn Bus) -> Step,
}

impl Unit {
    pub const fn new(name: &'static str, run: fn(&mut McuState, &mut dyn Bus) -> Step) -> Self {
        Self { name, run }
    }
}

/// The fixed per-frame call order.
pub const FRAME_SCHEDULE: [Unit; 20] = [
    Unit::new("interrupt gate", interrupt::run),
    Unit::new("input relay", input_relay::run),
    Unit::new("credit tracker", credit::run),
    Unit::new("lockout arbiter", lockout::run),
    Unit::new("credit controller A", controller::run::<0>),
    Unit::new("credit controller B", controller::run::<1>),
    Unit::new("level controller", controller::run::<2>),
    Unit::new("beastie relay P1", beastie::run::<0>),
    Unit::new("beastie relay P2", beastie::run::<1>),
    Unit::new("creeper 0", creeper::run::<0>),
    Unit::new("creeper 1", creeper::run::<1>),
    Unit::new("creeper 2", creeper::run::<2>),
    Unit::new("creeper 3", creeper::run::<3>),
    Unit::new("clock countdown", clock::run),
    Unit::new("credit mischief", mischief::run),
    Unit::new("extend rotator", extend::run),
    Unit::new("translator 0", translator::run::<0>),
    Unit::new("translator 1", translator::run::<1>),
    Unit::new("translator 2", translator::run::<2>),
    Unit::new("reset watcher", reset::run),
];

/// Read a bus cell as the coprocessor.
pub(crate) fn mcu_read(bus: &mut dyn Bus, addr: u16) -> u8 {
    bus.read(BusMaster::Mcu, addr)
}

/// Write a bus cell as the coprocessor.
pub(crate) fn mcu_write(bus: &mut dyn Bus, addr: u16, data: u8) {
    bus.write(BusMaster::Mcu, addr, data);
}

/// All private coprocessor state. Re-zeroed on warm and cold reset, except
/// for the translator tables, which model mask ROM.
pub struct McuState {
    pub relay: InputRelay,
    pub credits: CreditTracker,
    pub controllers: [controller::Controller; 3],
    pub beasties: [BeastieRelay; map::PLAYER_COUNT],
    pub creepers: [Creeper; map::CREEPER_COUNT],
    pub tables: TranslatorTables,
    /// Image of the digital output latch (interrupt line, lockout coil).
    pub outputs: u8,
    /// Set by the interrupt gate when it pulsed during the current frame.
    pub pulsed: bool,
}

impl McuState {
    pub fn new(tables: TranslatorTables) -> Self {
        Self {
            relay: InputRelay::new(),
            credits: CreditTracker::new(),
            controllers: controller::Controller::all(),
            beasties: [BeastieRelay::new(), BeastieRelay::new()],
            creepers: [Creeper::new(); map::CREEPER_COUNT],
            tables,
            outputs: 0,
            pulsed: false,
        }
    }

    /// Set or clear bits of the output latch and drive the port.
    pub(crate) fn drive_output(&mut self, bus: &mut dyn Bus, mask: u8, on: bool) {
        if on {
            self.outputs |= mask;
        } else {
            self.outputs &= !mask;
        }
        bus.io_write(PORT_OUTPUT, self.outputs);
    }

    /// Re-zero everything except mask ROM.
    fn clear(&mut self) {
        let tables = std::mem::take(&mut self.tables);
        *self = Self::new(tables);
    }
}

/// Running counters kept outside the coprocessor state so that they survive
/// warm resets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct McuStats {
    pub frames: u64,
    pub interrupts: u64,
    pub pads: u64,
    pub pad_cycles: u64,
    pub warm_resets: u64,
}

/// The coprocessor and its frame dispatcher.
pub struct Mcu {
    state: McuState,
    schedule: Vec<Unit>,
    poisoned: Option<ControllerId>,
    stats: McuStats,
}

impl Mcu {
    /// Create a coprocessor with the built-in translator tables.
    pub fn new() -> Self {
        Self::with_tables(TranslatorTables::default())
    }

    /// Create a coprocessor with translator tables loaded from a table image.
    pub fn with_tables(tables: TranslatorTables) -> Self {
        Self {
            state: McuState::new(tables),
            schedule: FRAME_SCHEDULE.to_vec(),
            poisoned: None,
            stats: McuStats::default(),
        }
    }

    /// Replace the frame schedule. Used to run subsystems in isolation.
    pub fn with_schedule(mut self, schedule: Vec<Unit>) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn schedule(&self) -> &[Unit] {
        &self.schedule
    }

    pub fn state(&self) -> &McuState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut McuState {
        &mut self.state
    }

    pub fn stats(&self) -> McuStats {
        self.stats
    }

    /// The controller whose integrity check halted the coprocessor, if any.
    pub fn poisoned(&self) -> Option<ControllerId> {
        self.poisoned
    }

    /// Run one frame.
    pub fn tick(&mut self, bus: &mut dyn Bus) -> TickOutcome {
        if self.poisoned.is_some() {
            return TickOutcome::Halted;
        }

        self.state.pulsed = false;
        for unit in &self.schedule {
            match (unit.run)(&mut self.state, bus) {
                Step::Continue => {}
                Step::WarmReset => {
                    log::debug!("warm reset requested by host");
                    let pulsed = self.state.pulsed;
                    self.state.clear();
                    self.state.pulsed = pulsed;
                    bus.io_write(PORT_OUTPUT, self.state.outputs);
                    self.stats.warm_resets += 1;
                }
                Step::Poisoned(id) => {
                    log::debug!("{} poisoned during {:?}; halting", unit.name, id);
                    self.poisoned = Some(id);
                    self.stats.frames += 1;
                    return TickOutcome::Poisoned(id);
                }
            }
        }

        if mcu_read(bus, map::DELAY_MARKER) == 0 {
            self.stats.pads += 1;
            self.stats.pad_cycles += DELAY_PAD_CYCLES;
        }
        if self.state.pulsed {
            self.stats.interrupts += 1;
        }
        self.stats.frames += 1;
        log::trace!("frame {} complete", self.stats.frames);
        TickOutcome::Completed
    }

    /// Power-cycle: clear all state, the poison latch and the counters.
    pub fn cold_reset(&mut self) {
        self.state.clear();
        self.poisoned = None;
        self.stats = McuStats::default();
    }
}

impl Default for Mcu {
    fn default() -> Self {
        Self::new()
    }
}
