mod notice;
mod online_link;
mod presenter;
mod session;
mod session_command;
mod session_config;

pub use notice::*;
pub use presenter::*;
pub use session::*;
pub use session_command::*;
pub use session_config::*;
