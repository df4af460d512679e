//! Text presentation of boards and visit transcripts.

use tileslide_kernel::puzzle::board::Board;

/// Separator printed between consecutive boards of a transcript.
pub const ARROW: &str = "\n  |  \n  |  \n \\'/\n";

/// One row per line, cells right-aligned to the widest label.
#[must_use]
pub fn render_board(board: &Board) -> String {
    let width = board
        .cells()
        .iter()
        .map(|s| s.to_string().len())
        .max()
        .unwrap_or(1);
    board
        .rows()
        .map(|row| {
            row.iter()
                .map(|s| format!("{:>width$}", s.to_string()))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The transcript fragment for the `index`-th visited board: the arrow
/// (after the first board), the board, and a newline.
#[must_use]
pub fn render_step(index: usize, board: &Board) -> String {
    let mut out = String::new();
    if index > 0 {
        out.push_str(ARROW);
    }
    out.push_str(&render_board(board));
    out.push('\n');
    out
}

/// Boards in visit order, joined by [`ARROW`]. Ends with a newline unless
/// `boards` is empty.
#[must_use]
pub fn render_transcript(boards: &[Board]) -> String {
    boards
        .iter()
        .enumerate()
        .map(|(i, board)| render_step(i, board))
        .collect()
}
