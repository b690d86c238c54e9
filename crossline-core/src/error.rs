use thiserror::Error;

/// Reasons a move is not applied. None of these are surfaced to the player:
/// they come from races (a stale remote move) or from clicks at the wrong time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("it is not the local player's turn")]
    NotYourTurn,

    #[error("the game is over")]
    GameOver,

    #[error("cell index {0} is outside the board")]
    InvalidCell(usize),
}

/// Failure to encode or decode a move message on the data channel.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed move message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to encode move message: {0}")]
    Encode(serde_json::Error),
}

/// A room identifier that cannot be used to join.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomIdError {
    #[error("room id '{0}' must be at least {min} alphanumeric characters", min = crate::model::RoomId::MIN_LEN)]
    Invalid(String),

    #[error("link '{0}' carries no room parameter")]
    MissingParameter(String),
}
