/// Dual-ported shared RAM (1KB) at 0xC00-0xFFF.
///
/// Both the coprocessor and the host game CPU read and write this memory.
/// It carries every mailbox, counter and output window the two sides
/// exchange. Contents do not survive a power cycle.
pub struct SharedRam {
    data: [u8; 1024],
}

impl SharedRam {
    /// Create a new shared RAM initialized to all zeros.
    pub fn new() -> Self {
        Self { data: [0; 1024] }
    }

    /// Read a byte. Offset is masked to 10 bits (0x000-0x3FF).
    pub fn read(&self, offset: u16) -> u8 {
        self.data[(offset & 0x03FF) as usize]
    }

    /// Write a byte. Offset is masked to 10 bits (0x000-0x3FF).
    pub fn write(&mut self, offset: u16, value: u8) {
        self.data[(offset & 0x03FF) as usize] = value;
    }

    /// Zero the whole RAM (power cycle).
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn snapshot(&self) -> &[u8; 1024] {
        &self.data
    }
}

impl Default for SharedRam {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed() {
        let ram = SharedRam::new();
        assert!(ram.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn read_write_basic() {
        let mut ram = SharedRam::new();
        ram.write(0x00, 0x47);
        assert_eq!(ram.read(0x00), 0x47);
        ram.write(0x2FF, 0xAB);
        assert_eq!(ram.read(0x2FF), 0xAB);
    }

    #[test]
    fn offset_masking_wraps_at_1024() {
        let mut ram = SharedRam::new();
        ram.write(0, 0xDE);
        // 0xC00 & 0x3FF = 0x000, so absolute bus addresses also land correctly
        assert_eq!(ram.read(0xC00), 0xDE);
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut ram = SharedRam::new();
        ram.write(0x000, 0x5A);
        ram.write(0x3FF, 0x5A);
        ram.clear();
        assert_eq!(ram.snapshot(), &[0; 1024]);
    }
}
