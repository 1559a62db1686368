//! Text dumps of a board for logs and the CLI.

use std::fmt;

use crate::game_state::chess_types::*;

/// Fixed-width grid, rank 8 first: three characters per square, side letter
/// and piece letter (`wP `, `bK `) or three blanks when empty.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..BOARD_DIM).rev() {
            for file in 0..BOARD_DIM {
                let code = self.piece_at_square((rank * BOARD_DIM + file) as Square);
                match color_of(code) {
                    Some(side) => write!(f, "{}{} ", side.letter(), piece_letter(code))?,
                    None => f.write_str("   ")?,
                }
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Unicode diagram with file and rank labels.
///
/// Assumes square indexing where `0 == a1`, `7 == h1`, and `63 == h8`.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    out.push_str("  a b c d e f g h\n");

    for rank in (0..BOARD_DIM).rev() {
        out.push(char::from(b'1' + rank as u8));
        out.push(' ');
        for file in 0..BOARD_DIM {
            let code = board.piece_at_square((rank * BOARD_DIM + file) as Square);
            out.push(piece_to_unicode(code).unwrap_or('·'));
            if file < BOARD_DIM - 1 {
                out.push(' ');
            }
        }
        out.push(' ');
        out.push(char::from(b'1' + rank as u8));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}

fn piece_to_unicode(code: PieceCode) -> Option<char> {
    let light = code > 0;
    let ch = match (code.abs(), light) {
        (PAWN, true) => '♙',
        (KNIGHT, true) => '♘',
        (BISHOP, true) => '♗',
        (ROOK, true) => '♖',
        (QUEEN, true) => '♕',
        (KING, true) => '♔',
        (PAWN, false) => '♟',
        (KNIGHT, false) => '♞',
        (BISHOP, false) => '♝',
        (ROOK, false) => '♜',
        (QUEEN, false) => '♛',
        (KING, false) => '♚',
        _ => return None,
    };
    Some(ch)
}
