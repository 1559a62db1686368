//! Conversions between compact squares and padded mailbox cells.
//!
//! The 10x12 grid adds two sentinel ranks above and below the board and one
//! sentinel file on each side, so any knight jump from a real square lands
//! inside the array.

use crate::game_state::chess_types::{Cell, Square, BOARD_SIZE, MAILBOX_SIZE};

/// Padded cell -> compact square, `-1` for border cells.
pub const MAILBOX: [i8; MAILBOX_SIZE] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, 0, 1, 2, 3, 4, 5, 6, 7, -1, //
    -1, 8, 9, 10, 11, 12, 13, 14, 15, -1, //
    -1, 16, 17, 18, 19, 20, 21, 22, 23, -1, //
    -1, 24, 25, 26, 27, 28, 29, 30, 31, -1, //
    -1, 32, 33, 34, 35, 36, 37, 38, 39, -1, //
    -1, 40, 41, 42, 43, 44, 45, 46, 47, -1, //
    -1, 48, 49, 50, 51, 52, 53, 54, 55, -1, //
    -1, 56, 57, 58, 59, 60, 61, 62, 63, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, //
];

/// Compact square -> padded cell.
pub const MAILBOX64: [u8; BOARD_SIZE] = [
    21, 22, 23, 24, 25, 26, 27, 28, //
    31, 32, 33, 34, 35, 36, 37, 38, //
    41, 42, 43, 44, 45, 46, 47, 48, //
    51, 52, 53, 54, 55, 56, 57, 58, //
    61, 62, 63, 64, 65, 66, 67, 68, //
    71, 72, 73, 74, 75, 76, 77, 78, //
    81, 82, 83, 84, 85, 86, 87, 88, //
    91, 92, 93, 94, 95, 96, 97, 98, //
];

#[inline]
pub const fn cell_of(square: Square) -> Cell {
    MAILBOX64[square as usize] as Cell
}

#[inline]
pub fn square_of(cell: Cell) -> Option<Square> {
    match MAILBOX.get(cell) {
        Some(&sq) if sq >= 0 => Some(sq as Square),
        _ => None,
    }
}

#[inline]
pub fn is_border(cell: Cell) -> bool {
    square_of(cell).is_none()
}

/// Vertical mirror of a square (`a1 <-> a8`), used to read tables from Dark's side.
#[inline]
pub const fn mirror(square: Square) -> Square {
    (7 - square / 8) * 8 + square % 8
}

/// Cell reached by stepping `offset` from `cell`; callers stay within the padding.
#[inline]
pub fn offset_cell(cell: Cell, offset: isize) -> Cell {
    cell.wrapping_add_signed(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_are_inverse() {
        for sq in 0..BOARD_SIZE as Square {
            assert_eq!(square_of(cell_of(sq)), Some(sq));
        }
        let real_cells = (0..MAILBOX_SIZE).filter(|&c| !is_border(c)).count();
        assert_eq!(real_cells, BOARD_SIZE);
    }

    #[test]
    fn mirror_flips_ranks() {
        assert_eq!(mirror(0), 56);
        assert_eq!(mirror(63), 7);
        assert_eq!(mirror(mirror(27)), 27);
    }

    #[test]
    fn knight_jumps_stay_inside_padding() {
        for sq in 0..BOARD_SIZE as Square {
            let cell = cell_of(sq) as isize;
            for offset in [8, 12, 19, 21, -8, -12, -19, -21] {
                let target = cell + offset;
                assert!((0..MAILBOX_SIZE as isize).contains(&target));
            }
        }
    }
}
