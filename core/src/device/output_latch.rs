use crate::core::bus::{OUTPUT_COIN_LOCKOUT, OUTPUT_HOST_IRQ};

/// Digital output latch driven by the coprocessor.
///
/// The host interrupt line is edge-sensitive on the host side, so the latch
/// records every low→high transition of bit 0. The coin lockout coil on bit 1
/// is level-sensitive and is simply reported.
pub struct OutputLatch {
    value: u8,
    irq_edges: u32,
    lockout_changes: u32,
}

impl OutputLatch {
    pub fn new() -> Self {
        Self {
            value: 0,
            irq_edges: 0,
            lockout_changes: 0,
        }
    }

    /// Latch a new output byte, performing edge detection on the IRQ line.
    pub fn write(&mut self, data: u8) {
        let rising = (data & OUTPUT_HOST_IRQ) != 0 && (self.value & OUTPUT_HOST_IRQ) == 0;
        if rising {
            self.irq_edges = self.irq_edges.wrapping_add(1);
        }
        if (data ^ self.value) & OUTPUT_COIN_LOCKOUT != 0 {
            self.lockout_changes = self.lockout_changes.wrapping_add(1);
        }
        self.value = data;
    }

    pub fn read(&self) -> u8 {
        self.value
    }

    pub fn irq_line(&self) -> bool {
        (self.value & OUTPUT_HOST_IRQ) != 0
    }

    pub fn lockout_engaged(&self) -> bool {
        (self.value & OUTPUT_COIN_LOCKOUT) != 0
    }

    /// Number of lockout coil level changes seen so far.
    pub fn lockout_changes(&self) -> u32 {
        self.lockout_changes
    }

    /// Take the number of rising IRQ edges since the last call.
    pub fn take_irq_edges(&mut self) -> u32 {
        std::mem::take(&mut self.irq_edges)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for OutputLatch {
    fn default() -> Self {
        Self::new()
    }
}
