use crossline::CellIndex;
use crossline::peer::SessionCommand;
use std::io::BufRead;
use tokio::sync::mpsc;

pub const HELP: &str = "keys: 1-9 play a cell, r restart, n start over, h host a room, \
                        o play offline, q quit";

/// Maps one line of terminal input to a session command.
pub fn parse_key(line: &str) -> Option<SessionCommand> {
    let mut chars = line.trim().chars();
    let key = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    match key.to_ascii_lowercase() {
        'r' => Some(SessionCommand::Restart),
        'n' => Some(SessionCommand::StartOver),
        'h' => Some(SessionCommand::Host { room: None }),
        'o' => Some(SessionCommand::PlayOffline),
        'q' => Some(SessionCommand::Shutdown),
        digit => {
            let n = digit.to_digit(10)?;
            let cell = CellIndex::try_from(n.checked_sub(1)? as usize).ok()?;
            Some(SessionCommand::LocalMove(cell))
        }
    }
}

/// Reads stdin on a plain thread; blocking reads would otherwise keep the
/// runtime from shutting down. The receiver ends when stdin closes.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
