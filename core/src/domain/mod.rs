//! Domain layer: entities and the injected clock.

pub mod clock;
pub mod entities;

pub use clock::{Clock, SystemClock};
