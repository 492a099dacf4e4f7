//! Line-of-sight queen.
//!
//! The queen reaches every square whose centre it can "see": the straight
//! segment between the two centres must not pass through the open interior of
//! any occupied square other than the endpoints. Grazing a corner is not a
//! block.
//!
//! The test is exact. Coordinates are doubled so square centres land on odd
//! integers and square edges on even ones, and the crossing parameters are
//! compared as fractions.

use std::cmp::Ordering;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub fn queen_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    Square::all()
        .filter(|&to| to != from && board.is_open_for(to, color) && line_of_sight(board, from, to))
        .collect()
}

/// Whether the queen on `from` would reach `to` if it were empty or enemy.
#[inline]
pub fn queen_sees(board: &Board, from: Square, to: Square, color: Color) -> bool {
    from != to && board.is_open_for(to, color) && line_of_sight(board, from, to)
}

/// No occupied square strictly between the two centres blocks the segment.
pub fn line_of_sight(board: &Board, from: Square, to: Square) -> bool {
    let (row_lo, row_hi) = (from.row.min(to.row), from.row.max(to.row));
    let (col_lo, col_hi) = (from.col.min(to.col), from.col.max(to.col));

    for row in row_lo..=row_hi {
        for col in col_lo..=col_hi {
            let Some(sq) = Square::new(row, col) else {
                continue;
            };
            if sq == from || sq == to || board.is_empty(sq) {
                continue;
            }
            if segment_crosses_interior(from, to, sq) {
                return false;
            }
        }
    }

    true
}

/// Non-negative-denominator fraction compared by cross-multiplication.
#[derive(Debug, Clone, Copy)]
struct Ratio {
    num: i32,
    den: i32,
}

impl Ratio {
    fn new(num: i32, den: i32) -> Self {
        if den < 0 {
            Self { num: -num, den: -den }
        } else {
            Self { num, den }
        }
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ratio {}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num * other.den).cmp(&(other.num * self.den))
    }
}

/// Open parameter interval where one coordinate of the segment lies strictly
/// inside `(edge, edge + 2)`. `None` means the segment never enters the band.
fn band_interval(start: i32, delta: i32, edge: i32) -> Option<(Ratio, Ratio)> {
    if delta == 0 {
        return if edge < start && start < edge + 2 {
            Some((Ratio::new(0, 1), Ratio::new(1, 1)))
        } else {
            None
        };
    }
    let a = Ratio::new(edge - start, delta);
    let b = Ratio::new(edge + 2 - start, delta);
    Some(if a < b { (a, b) } else { (b, a) })
}

fn segment_crosses_interior(from: Square, to: Square, square: Square) -> bool {
    let start_y = 2 * from.row as i32 + 1;
    let start_x = 2 * from.col as i32 + 1;
    let dy = 2 * to.row as i32 + 1 - start_y;
    let dx = 2 * to.col as i32 + 1 - start_x;

    let Some((y_lo, y_hi)) = band_interval(start_y, dy, 2 * square.row as i32) else {
        return false;
    };
    let Some((x_lo, x_hi)) = band_interval(start_x, dx, 2 * square.col as i32) else {
        return false;
    };

    let lo = y_lo.max(x_lo).max(Ratio::new(0, 1));
    let hi = y_hi.min(x_hi).min(Ratio::new(1, 1));
    lo < hi
}
