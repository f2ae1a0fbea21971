pub mod input_device;
pub mod output_latch;
pub mod shared_ram;

pub use input_device::InputDevice;
pub use output_latch::OutputLatch;
pub use shared_ram::SharedRam;
