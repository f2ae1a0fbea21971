use gatekeeper_core::core::bus::{self, PORT_CABINET, PORT_OUTPUT};
use gatekeeper_core::core::{Bus, BusMaster};
use gatekeeper_core::device::OutputLatch;

/// Strict test bus: 4KB of memory, a cabinet input byte and an output
/// latch. Any access outside the modeled ranges panics.
pub struct TestBus {
    pub memory: [u8; 0x1000],
    pub cabinet: u8,
    pub latch: OutputLatch,
}

impl TestBus {
    pub fn new() -> Self {
        Self {
            memory: [0; 0x1000],
            cabinet: 0,
            latch: OutputLatch::new(),
        }
    }

    pub fn poke(&mut self, addr: u16, data: u8) {
        self.memory[addr as usize] = data;
    }

    pub fn peek(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }
}

impl Bus for TestBus {
    fn read(&mut self, _master: BusMaster, addr: u16) -> u8 {
        bus::classify(addr).unwrap_or_else(|e| panic!("{e}"));
        self.memory[addr as usize]
    }

    fn write(&mut self, master: BusMaster, addr: u16, data: u8) {
        match bus::classify(addr) {
            Ok(true) => self.memory[addr as usize] = data,
            Ok(false) => panic!("{master:?} wrote input bank 0x{addr:03X}"),
            Err(e) => panic!("{e}"),
        }
    }

    fn io_read(&mut self, port: u8) -> u8 {
        match port {
            PORT_CABINET => self.cabinet,
            _ => 0xFF,
        }
    }

    fn io_write(&mut self, port: u8, data: u8) {
        if port == PORT_OUTPUT {
            self.latch.write(data);
        }
    }
}
