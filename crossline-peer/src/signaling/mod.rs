mod exchange;
mod negotiation;
mod room_lease;
mod signal_event;

pub use exchange::*;
pub use negotiation::*;
pub use room_lease::*;
pub use signal_event::*;
