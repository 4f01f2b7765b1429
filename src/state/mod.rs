pub mod ticks;
pub mod touch;

pub use ticks::TickSet;
pub use touch::{TouchDrag, TouchRelease};
