pub mod recording_presenter;
pub mod wait_helpers;

pub use recording_presenter::*;
pub use wait_helpers::*;
