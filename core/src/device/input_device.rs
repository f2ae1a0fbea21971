/// Raw cabinet input hardware seen by the coprocessor.
///
/// Four 8-bit banks are decoded onto the bus at 0x000-0x003:
///
/// | Offset | Bank        | Notable bits                                   |
/// |--------|-------------|------------------------------------------------|
/// | 0      | P1 controls | bit 7 = coin A                                 |
/// | 1      | P2 controls | bit 7 = coin B                                 |
/// | 2      | DIP A       | 1:0 coin A price, 3:2 coin B price, 7:4 misc   |
/// | 3      | DIP B       | bit 7 = service credit button                  |
///
/// A fifth byte (coin door, tilt and cabinet switches) is wired straight to
/// the coprocessor's digital input port rather than the bus.
pub struct InputDevice {
    banks: [u8; 4],
    cabinet: u8,
}

impl InputDevice {
    pub fn new() -> Self {
        Self {
            banks: [0; 4],
            cabinet: 0,
        }
    }

    /// Read a bank. `offset` is masked to 2 bits.
    pub fn read(&self, offset: u16) -> u8 {
        self.banks[(offset & 0x03) as usize]
    }

    /// Drive a whole bank (DIP switches are set this way).
    pub fn set_bank(&mut self, offset: u16, value: u8) {
        self.banks[(offset & 0x03) as usize] = value;
    }

    /// Drive one bit of a bank (buttons and coin switches).
    pub fn set_bank_bit(&mut self, offset: u16, bit: u8, on: bool) {
        set_bit(&mut self.banks[(offset & 0x03) as usize], bit, on);
    }

    pub fn cabinet(&self) -> u8 {
        self.cabinet
    }

    pub fn set_cabinet_bit(&mut self, bit: u8, on: bool) {
        set_bit(&mut self.cabinet, bit, on);
    }

    /// Release every switch. DIP banks are preserved; they are board
    /// configuration, not live input.
    pub fn release_all(&mut self) {
        self.banks[0] = 0;
        self.banks[1] = 0;
        self.banks[3] &= 0x7F;
        self.cabinet = 0;
    }
}

impl Default for InputDevice {
    fn default() -> Self {
        Self::new()
    }
}

/// Active-high bit manipulation: set bit on press, clear on release.
pub fn set_bit(reg: &mut u8, bit: u8, on: bool) {
    if on {
        *reg |= 1 << bit;
    } else {
        *reg &= !(1 << bit);
    }
}
