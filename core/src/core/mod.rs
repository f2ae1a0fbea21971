pub mod bus;
pub mod machine;

pub use bus::{Bus, BusError, BusMaster};
pub use machine::{InputButton, Machine};
