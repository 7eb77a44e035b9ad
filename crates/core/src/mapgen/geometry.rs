//! Axis-aligned rectangle primitives and the overlap tests used by seeding and growth.

use serde::{Deserialize, Serialize};

use crate::types::{RoomId, Wall};

use super::model::Room;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive upper x bound.
    pub fn max_x(self) -> i32 {
        self.x + self.width
    }

    /// Exclusive upper y bound.
    pub fn max_y(self) -> i32 {
        self.y + self.height
    }

    pub fn last_x(self) -> i32 {
        self.max_x() - 1
    }

    pub fn last_y(self) -> i32 {
        self.max_y() - 1
    }

    pub fn contains_rect(self, other: Self) -> bool {
        other.x >= self.x
            && other.max_x() <= self.max_x()
            && other.y >= self.y
            && other.max_y() <= self.max_y()
    }

    /// True when at least one cell lies inside both rectangles.
    pub fn shares_cells(self, other: Self) -> bool {
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    pub fn contains_cell(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.max_x() && y >= self.y && y < self.max_y()
    }

    /// The rectangle with one edge pushed outward by a single cell.
    pub fn grown_toward(self, wall: Wall) -> Self {
        match wall {
            Wall::PosX => Self { width: self.width + 1, ..self },
            Wall::PosY => Self { height: self.height + 1, ..self },
            Wall::NegX => Self { x: self.x - 1, width: self.width + 1, ..self },
            Wall::NegY => Self { y: self.y - 1, height: self.height + 1, ..self },
        }
    }
}

/// Overlap test over half-open rectangles.
///
/// Strict mode (`allow_touching == false`) counts a shared boundary row or column
/// as overlap, so two rooms can never share a wall line. Touching mode lets the
/// last line of one rectangle coincide with the first line of the other.
/// The x axis is asymmetric in strict mode: a rectangle to the right of `b`
/// needs one empty column between them, one to the left may sit flush.
pub fn rectangles_intersect(a: Rect, b: Rect, allow_touching: bool) -> bool {
    let (ax1, ax2, ay1, ay2) = (a.x, a.max_x(), a.y, a.max_y());
    let (bx1, bx2, by1, by2) = (b.x, b.max_x(), b.y, b.max_y());

    let to_right = if allow_touching { ax1 >= bx2 - 1 } else { ax1 > bx2 };
    let to_left = if allow_touching { ax2 - 1 <= bx1 } else { ax2 - 1 < bx1 };
    let above = if allow_touching { ay1 >= by2 - 1 } else { ay1 > by2 - 1 };
    let below = if allow_touching { ay2 - 1 <= by1 } else { ay2 - 1 < by1 };

    !(to_right || to_left || above || below)
}

pub fn rect_intersects_room(rect: Rect, room: &Room) -> bool {
    rectangles_intersect(rect, room.rect, false)
}

/// True when `candidate` strictly intersects none of `rooms`, skipping `excluding`.
pub fn room_is_clear(candidate: Rect, excluding: Option<RoomId>, rooms: &[Room]) -> bool {
    rooms
        .iter()
        .enumerate()
        .filter(|&(index, _)| excluding != Some(RoomId(index)))
        .all(|(_, room)| !rect_intersects_room(candidate, room))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::MasterRoomId;

    fn room(x: i32, y: i32, width: i32, height: i32) -> Room {
        Room { rect: Rect::new(x, y, width, height), master: MasterRoomId(0) }
    }

    #[test]
    fn overlapping_interiors_intersect_in_both_modes() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(2, 2, 4, 4);
        assert!(rectangles_intersect(a, b, false));
        assert!(rectangles_intersect(a, b, true));
    }

    #[test]
    fn rectangles_far_apart_never_intersect() {
        let a = Rect::new(0, 0, 3, 3);
        let b = Rect::new(10, 10, 3, 3);
        assert!(!rectangles_intersect(a, b, false));
        assert!(!rectangles_intersect(a, b, true));
    }

    #[test]
    fn flush_vertical_neighbours_are_clear_in_both_modes() {
        let lower = Rect::new(0, 0, 3, 3);
        let upper = Rect::new(0, 3, 3, 3);
        assert!(!rectangles_intersect(upper, lower, false));
        assert!(!rectangles_intersect(lower, upper, false));
        assert!(!rectangles_intersect(upper, lower, true));
        assert!(!rectangles_intersect(lower, upper, true));
    }

    #[test]
    fn shared_wall_row_only_collides_in_strict_mode() {
        let lower = Rect::new(0, 0, 3, 3);
        let upper = Rect::new(0, 2, 3, 3);
        assert!(rectangles_intersect(upper, lower, false));
        assert!(!rectangles_intersect(upper, lower, true));
    }

    #[test]
    fn flush_neighbour_on_the_left_is_clear() {
        let left = Rect::new(0, 0, 3, 3);
        let right = Rect::new(3, 0, 3, 3);
        assert!(!rectangles_intersect(left, right, false));
        assert!(!rectangles_intersect(left, right, true));
    }

    #[test]
    fn strict_mode_needs_a_gap_when_the_candidate_sits_to_the_right() {
        let existing = Rect::new(0, 0, 3, 3);
        assert!(rectangles_intersect(Rect::new(3, 0, 3, 3), existing, false));
        assert!(!rectangles_intersect(Rect::new(4, 0, 3, 3), existing, false));
    }

    #[test]
    fn shared_wall_column_counts_as_overlap() {
        let a = Rect::new(0, 0, 3, 3);
        let b = Rect::new(2, 0, 3, 3);
        assert!(rectangles_intersect(a, b, false));
        assert!(rectangles_intersect(b, a, false));
        assert!(!rectangles_intersect(a, b, true));
    }

    #[test]
    fn room_is_clear_ignores_the_excluded_room() {
        let rooms = vec![room(0, 0, 3, 3), room(10, 0, 3, 3)];
        let grown = Rect::new(0, 0, 4, 3);
        assert!(!room_is_clear(grown, None, &rooms));
        assert!(room_is_clear(grown, Some(RoomId(0)), &rooms));
        assert!(!room_is_clear(Rect::new(9, 0, 3, 3), Some(RoomId(0)), &rooms));
    }

    #[test]
    fn shares_cells_ignores_flush_neighbours() {
        let a = Rect::new(0, 0, 4, 4);
        assert!(a.shares_cells(Rect::new(3, 3, 2, 2)));
        assert!(!a.shares_cells(Rect::new(4, 0, 3, 3)));
        assert!(!a.shares_cells(Rect::new(0, -3, 4, 3)));
    }

    #[test]
    fn grown_toward_moves_only_the_requested_edge() {
        let rect = Rect::new(2, 3, 4, 5);
        assert_eq!(rect.grown_toward(Wall::PosX), Rect::new(2, 3, 5, 5));
        assert_eq!(rect.grown_toward(Wall::PosY), Rect::new(2, 3, 4, 6));
        assert_eq!(rect.grown_toward(Wall::NegX), Rect::new(1, 3, 5, 5));
        assert_eq!(rect.grown_toward(Wall::NegY), Rect::new(2, 2, 4, 6));
    }

    proptest! {
        #[test]
        fn touching_intersection_implies_strict_intersection(
            ax in -20_i32..20, ay in -20_i32..20, aw in 1_i32..8, ah in 1_i32..8,
            bx in -20_i32..20, by in -20_i32..20, bw in 1_i32..8, bh in 1_i32..8
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            if rectangles_intersect(a, b, true) {
                prop_assert!(rectangles_intersect(a, b, false));
            }
        }

        #[test]
        fn strict_miss_means_no_shared_cells(
            ax in -20_i32..20, ay in -20_i32..20, aw in 1_i32..8, ah in 1_i32..8,
            bx in -20_i32..20, by in -20_i32..20, bw in 1_i32..8, bh in 1_i32..8
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            if !rectangles_intersect(a, b, false) {
                let shares_cell = (a.x..a.max_x())
                    .any(|x| (a.y..a.max_y()).any(|y| b.contains_cell(x, y)));
                prop_assert!(!shares_cell, "{a:?} and {b:?} share a cell");
            }
        }
    }
}
