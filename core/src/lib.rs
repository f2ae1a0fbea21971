pub mod core;
pub mod device;
pub mod mcu;

pub mod prelude {
    pub use crate::core::machine::{InputButton, Machine};
    pub use crate::core::{Bus, BusError, BusMaster};
    pub use crate::mcu::{Mcu, TickOutcome};
}
