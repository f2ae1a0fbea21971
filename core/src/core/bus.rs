use std::ops::RangeInclusive;

use thiserror::Error;

/// Width of the shared address space: 12 bits, 0x000-0xFFF.
pub const ADDRESS_SPACE: usize = 0x1000;

/// Raw control/DIP banks, read-only from both sides of the bus.
pub const INPUT_RANGE: RangeInclusive<u16> = 0x000..=0x003;

/// Memory jointly owned by the coprocessor and the host game CPU.
pub const SHARED_RANGE: RangeInclusive<u16> = 0xC00..=0xFFF;

/// Digital input port carrying the raw cabinet switches (coin doors, tilt).
pub const PORT_CABINET: u8 = 0;

/// Digital output latch. Bit 0 drives the host interrupt line, bit 1 the
/// coin lockout coil.
pub const PORT_OUTPUT: u8 = 1;

pub const OUTPUT_HOST_IRQ: u8 = 0x01;
pub const OUTPUT_COIN_LOCKOUT: u8 = 0x02;

/// Identifies who is accessing the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusMaster {
    /// The coprocessor running its frame dispatch loop.
    Mcu,
    /// The host game CPU on the other side of the shared RAM.
    Host,
}

/// Failed checked access. Normal operation never produces these; they exist
/// so that test harnesses can fail fast on a bad address.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    #[error("address 0x{0:04X} is outside the modeled ranges")]
    AddressOutOfRange(u16),
    #[error("address 0x{0:04X} is read-only")]
    ReadOnly(u16),
}

/// Byte-wide bus shared between the coprocessor and its collaborators.
///
/// Memory accesses are whole-byte and instantaneous; the request/acknowledge
/// handshake of the real part is not modeled. Reads of unmapped addresses
/// return open-bus `0xFF` and writes to them are dropped.
pub trait Bus {
    fn read(&mut self, master: BusMaster, addr: u16) -> u8;
    fn write(&mut self, master: BusMaster, addr: u16, data: u8);

    /// Read a digital input port (separate from the memory space).
    fn io_read(&mut self, port: u8) -> u8;

    /// Write a digital output port (separate from the memory space).
    fn io_write(&mut self, port: u8, data: u8);
}

/// Classify an address against the modeled ranges.
///
/// Returns `Ok(true)` for shared (writable) memory, `Ok(false)` for the
/// read-only input banks.
pub fn classify(addr: u16) -> Result<bool, BusError> {
    if SHARED_RANGE.contains(&addr) {
        Ok(true)
    } else if INPUT_RANGE.contains(&addr) {
        Ok(false)
    } else {
        Err(BusError::AddressOutOfRange(addr))
    }
}
