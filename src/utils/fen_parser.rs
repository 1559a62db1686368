//! Minimal FEN placement loader.
//!
//! Only the first (placement) field is read: ranks separated by `/`, rank 8
//! first, digits skipping files, letters placing pieces (uppercase Light,
//! lowercase Dark). Parsing stops at the first space. Anything it does not
//! understand is skipped, so a malformed string yields a partial board rather
//! than an error.

use crate::game_state::chess_types::*;

/// Signed piece code for a FEN letter.
pub fn piece_from_fen_char(ch: char) -> Option<PieceCode> {
    let kind = match ch.to_ascii_lowercase() {
        'p' => PAWN,
        'n' => KNIGHT,
        'b' => BISHOP,
        'r' => ROOK,
        'q' => QUEEN,
        'k' => KING,
        _ => return None,
    };
    Some(if ch.is_ascii_uppercase() { kind } else { -kind })
}

/// Place the pieces of `fen` onto `board` without clearing it first.
///
/// Placements that would fall past the h-file or below rank 1 are dropped.
pub fn load_placement(board: &mut Board, fen: &str) {
    let mut rank: isize = BOARD_DIM as isize - 1;
    let mut file: usize = 0;

    for ch in fen.chars() {
        match ch {
            ' ' => break,
            '/' => {
                rank -= 1;
                file = 0;
            }
            '1'..='8' => file += ch as usize - '0' as usize,
            _ => {
                let Some(code) = piece_from_fen_char(ch) else {
                    continue;
                };
                if rank >= 0 && file < BOARD_DIM {
                    board.set_piece_at_square((rank as usize * BOARD_DIM + file) as Square, code);
                }
                file += 1;
            }
        }
    }
}

/// Placement field for the pieces on `board` (the inverse of [`load_placement`]).
pub fn placement_of(board: &Board) -> String {
    let mut out = String::with_capacity(72);
    for rank in (0..BOARD_DIM).rev() {
        let mut empty = 0;
        for file in 0..BOARD_DIM {
            let code = board.piece_at_square((rank * BOARD_DIM + file) as Square);
            if code == EMPTY {
                empty += 1;
                continue;
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
                empty = 0;
            }
            let letter = piece_letter(code);
            out.push(if code > 0 {
                letter
            } else {
                letter.to_ascii_lowercase()
            });
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out
}
