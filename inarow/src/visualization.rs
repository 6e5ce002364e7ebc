use crate::{Board, Line};

/// Draws the board as text, one line per row, with row and column numbers.
///
/// Cells in `highlight` are followed by a `*`.
pub fn visualize_board(board: &Board, highlight: Option<&Line>) -> String {
    // Column numbers, tens above units so that wide boards still line up
    let mut result = String::from("     ");
    for col in 0..board.width() {
        result += &format!("{} ", (col / 10) % 10);
    }
    result += "\n     ";
    for col in 0..board.width() {
        result += &format!("{} ", col % 10);
    }
    result += "\n    ╭";
    for _ in 0..board.width() {
        result += "──";
    }
    result += "╮\n";

    for (row, cells) in board.rows().enumerate() {
        result += &format!("{:>3} │", row);
        for (col, owner) in cells.iter().enumerate() {
            result.push(owner.map(|player| player.symbol()).unwrap_or('·'));
            let highlighted = highlight.map_or(false, |line| line.contains(row, col));
            result.push(if highlighted { '*' } else { ' ' });
        }
        result += "│\n";
    }

    result += "    ╰";
    for _ in 0..board.width() {
        result += "──";
    }
    result += "╯";
    result
}
