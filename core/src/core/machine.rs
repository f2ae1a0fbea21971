/// Describes a single input button that a machine accepts.
pub struct InputButton {
    /// Machine-defined button identifier, passed to `set_input()`.
    pub id: u8,
    /// Human-readable name for display/configuration (e.g., "P1 Up", "Coin A").
    pub name: &'static str,
}

/// Machine-agnostic interface for emulated boards.
///
/// Each board implements this trait to give the frontend a uniform surface.
/// The frontend plays the part of the host game: it latches inputs, pokes
/// shared memory between frames and counts interrupts, without knowing how
/// the board routes any of it.
pub trait Machine {
    /// Run one frame of emulation (one coprocessor tick).
    fn run_frame(&mut self);

    /// Handle an input event. `button` is a machine-defined ID from `input_map()`.
    /// `pressed` is true for key-down, false for key-up.
    ///
    /// Each call latches the button state so that `run_frame()` sees the
    /// accumulated input.
    fn set_input(&mut self, button: u8, pressed: bool);

    /// Get the list of input buttons this machine accepts.
    fn input_map(&self) -> &[InputButton];

    /// Reset the machine to its initial power-on state.
    fn reset(&mut self);

    /// Read a byte as the host CPU would see it.
    fn host_read(&mut self, addr: u16) -> u8;

    /// Write a byte as the host CPU would.
    fn host_write(&mut self, addr: u16, data: u8);

    /// Number of host interrupt edges since the last call.
    fn take_host_irqs(&mut self) -> u32;

    /// Snapshot of the shared memory window as the host sees it.
    fn shared_memory(&self) -> &[u8];

    /// Set the DIP switch banks, first bank first. Boards without DIP
    /// switches ignore this.
    fn set_dip_switches(&mut self, _banks: &[u8]) {}

    /// True once the board has stopped servicing frames until a power cycle.
    fn is_halted(&self) -> bool {
        false
    }
}
