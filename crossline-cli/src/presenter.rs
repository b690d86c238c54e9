use async_trait::async_trait;
use colored::*;
use crossline::game::Scoreboard;
use crossline::model::Board;
use crossline::peer::{Notice, Presenter};
use crossline::{CellIndex, GameStatus, Symbol};

/// Prints the game to stdout. Logs go to stderr.
#[derive(Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Presenter for TerminalPresenter {
    async fn on_state_changed(&self, board: &Board, _turn: Symbol, status: &GameStatus) {
        println!("\n{}", render_board(board, status));
    }

    async fn on_connection_established(&self, local: Symbol) {
        println!(
            "{} {}",
            "Peer connected.".green().bold(),
            format!("You play {}.", local).as_str().bold()
        );
    }

    async fn on_scores_changed(&self, scores: &Scoreboard) {
        println!("{}", render_scores(scores).as_str().dimmed());
    }

    async fn on_notice(&self, notice: &Notice) {
        let text = notice.to_string();
        let text = text.as_str();
        let line = match notice {
            Notice::Outcome(_) | Notice::Connected(_) => text.green().bold(),
            Notice::PeerDisconnected | Notice::SetupFailed(_) | Notice::NoStore => text.red(),
            Notice::RoomCreated { .. } => text.cyan().bold(),
            _ => text.yellow(),
        };
        println!("{}", line);
    }
}

/// Three rows of three; empty cells show the key that plays them.
pub fn render_board(board: &Board, status: &GameStatus) -> String {
    let line = status.winning_line();
    let rows: Vec<String> = CellIndex::all()
        .collect::<Vec<_>>()
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|&cell| render_cell(board, cell, line.is_some_and(|l| l.contains(&cell))))
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect();
    rows.join("\n---------\n")
}

fn render_cell(board: &Board, cell: CellIndex, winning: bool) -> String {
    let mark = match board.get(cell) {
        Some(Symbol::X) => "X".red().bold(),
        Some(Symbol::O) => "O".blue().bold(),
        None => (cell.get() + 1).to_string().as_str().dimmed(),
    };
    if winning {
        mark.on_green().to_string()
    } else {
        mark.to_string()
    }
}

pub fn render_scores(scores: &Scoreboard) -> String {
    format!(
        "X wins: {}  O wins: {}  Draws: {}",
        scores.x_wins, scores.o_wins, scores.draws
    )
}
