use crossline_core::{GameStatus, RoomId, Symbol};
use std::fmt;

/// Status line updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Offline,
    CreatingRoom,
    RoomCreated {
        room: RoomId,
        link: Option<String>,
    },
    JoiningRoom(RoomId),
    AnswerSent,
    Connected(Symbol),
    Turn(Symbol),
    WaitingFor(Symbol),
    Outcome(GameStatus),
    PeerDisconnected,
    SetupFailed(String),
    NoStore,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Offline => write!(f, "Offline mode: X starts."),
            Notice::CreatingRoom => write!(f, "Creating room…"),
            Notice::RoomCreated {
                link: Some(link), ..
            } => write!(f, "Share this link with your friend: {}", link),
            Notice::RoomCreated { room, link: None } => {
                write!(f, "Room {} created. Waiting for a friend to join…", room)
            }
            Notice::JoiningRoom(_) => write!(f, "Joining room…"),
            Notice::AnswerSent => write!(f, "Answer sent. Connecting…"),
            Notice::Connected(symbol) => write!(f, "Connected! You are {}.", symbol),
            Notice::Turn(symbol) => write!(f, "Player {}'s turn", symbol),
            Notice::WaitingFor(symbol) => write!(f, "Waiting for {}…", symbol),
            Notice::Outcome(status) => write!(f, "{}", status),
            Notice::PeerDisconnected => write!(f, "Your opponent disconnected."),
            Notice::SetupFailed(reason) => write!(f, "Could not set up online game: {}", reason),
            Notice::NoStore => write!(f, "Online play needs a signaling store."),
        }
    }
}
