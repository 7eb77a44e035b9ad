//! Master-room placement, rejection-sampled room seeding, and incremental room growth.

use tracing::{debug, trace};

use crate::config::GeneratorConfig;
use crate::types::{MasterRoomId, RoomId, Wall};

use super::geometry::{Rect, room_is_clear};
use super::model::{MasterRoom, Room};
use super::seed::RandomStream;

pub(super) fn place_master_rooms(config: &GeneratorConfig) -> Vec<MasterRoom> {
    config.master_rooms.iter().map(|master| MasterRoom { rect: master.rect() }).collect()
}

/// Share of a floor-wide room target assigned to master `index` of `masters`.
/// Earlier masters take the remainder, so the shares always sum to `total`.
pub(super) fn rooms_for_master(total: usize, masters: usize, index: usize) -> usize {
    total / masters + usize::from(index < total % masters)
}

/// Budget and sizing for one master room's seeding run.
#[derive(Clone, Copy, Debug)]
pub(super) struct SeedingRules {
    pub(super) target: usize,
    pub(super) min_room_size: i32,
    pub(super) attempts: u32,
}

/// Places up to `rules.target` minimum-size rooms inside `master`, appending to
/// `rooms`. Slots that find no clear origin within the attempt budget are
/// dropped. Returns how many rooms were placed.
pub(super) fn seed_rooms(
    stream: &mut RandomStream,
    master_id: MasterRoomId,
    master: &MasterRoom,
    rules: SeedingRules,
    rooms: &mut Vec<Room>,
) -> usize {
    let bounds = master.rect;
    let max_x = bounds.max_x() - rules.min_room_size;
    let max_y = bounds.max_y() - rules.min_room_size;

    let mut placed = 0;
    for slot in 0..rules.target {
        let existing: &[Room] = rooms;
        let found = (0..rules.attempts).find_map(|_| {
            let x = stream.range_inclusive(bounds.x, max_x);
            let y = stream.range_inclusive(bounds.y, max_y);
            let candidate = Rect::new(x, y, rules.min_room_size, rules.min_room_size);
            room_is_clear(candidate, None, existing).then_some(candidate)
        });

        match found {
            Some(rect) => {
                rooms.push(Room { rect, master: master_id });
                placed += 1;
            }
            None => debug!(slot, master = master_id.0, "no clear origin for room slot"),
        }
    }
    placed
}

/// Tries to push each edge of `rooms[index]` out by one cell, in `Wall::ALL`
/// order. Returns whether any edge moved.
pub(super) fn extend_room(masters: &[MasterRoom], rooms: &mut [Room], index: usize) -> bool {
    let bounds = masters[rooms[index].master.0].rect;
    let mut grew = false;

    for wall in Wall::ALL {
        let trial = rooms[index].rect.grown_toward(wall);
        if !bounds.contains_rect(trial) {
            continue;
        }
        if room_is_clear(trial, Some(RoomId(index)), rooms) {
            rooms[index].rect = trial;
            grew = true;
        }
    }
    grew
}

/// Runs up to `passes` growth passes over every room, stopping early once a
/// whole pass leaves every room unchanged.
pub(super) fn extend_rooms(masters: &[MasterRoom], rooms: &mut [Room], passes: u32) -> u32 {
    for pass in 0..passes {
        let mut any_grew = false;
        for index in 0..rooms.len() {
            any_grew |= extend_room(masters, rooms, index);
        }
        if !any_grew {
            trace!(pass, "room growth converged");
            return pass;
        }
    }
    passes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::geometry::rectangles_intersect;

    fn master(x: i32, y: i32, width: i32, height: i32) -> MasterRoom {
        MasterRoom { rect: Rect::new(x, y, width, height) }
    }

    fn rules(target: usize) -> SeedingRules {
        SeedingRules { target, min_room_size: 3, attempts: 10_000 }
    }

    fn assert_disjoint(rooms: &[Room]) {
        for (left_index, left) in rooms.iter().enumerate() {
            for right in &rooms[left_index + 1..] {
                assert!(
                    !rectangles_intersect(left.rect, right.rect, false)
                        || !rectangles_intersect(right.rect, left.rect, false),
                    "rooms overlap: {left:?} vs {right:?}"
                );
            }
        }
    }

    #[test]
    fn floor_target_is_shared_across_masters() {
        assert_eq!((0..3).map(|index| rooms_for_master(7, 3, index)).collect::<Vec<_>>(), [3, 2, 2]);
        assert_eq!((0..4).map(|index| rooms_for_master(2, 4, index)).collect::<Vec<_>>(), [1, 1, 0, 0]);
        assert_eq!(rooms_for_master(6, 1, 0), 6);
    }

    #[test]
    fn seeded_rooms_are_minimum_size_and_inside_their_master() {
        let masters = [master(-4, 6, 10, 10)];
        let mut rooms = Vec::new();
        let mut stream = RandomStream::new(42);
        let placed = seed_rooms(&mut stream, MasterRoomId(0), &masters[0], rules(4), &mut rooms);

        assert_eq!(placed, rooms.len());
        assert!(!rooms.is_empty());
        for room in &rooms {
            assert_eq!((room.rect.width, room.rect.height), (3, 3));
            assert!(masters[0].rect.contains_rect(room.rect));
        }
        assert_disjoint(&rooms);
    }

    #[test]
    fn exact_fit_master_admits_a_single_room() {
        let masters = [master(0, 0, 3, 3)];
        let mut rooms = Vec::new();
        let mut stream = RandomStream::new(7);
        let placed = seed_rooms(&mut stream, MasterRoomId(0), &masters[0], rules(4), &mut rooms);

        assert_eq!(placed, 1);
        assert_eq!(rooms[0].rect, Rect::new(0, 0, 3, 3));
        assert!(!extend_room(&masters, &mut rooms, 0));
        assert_eq!(rooms[0].rect, Rect::new(0, 0, 3, 3));
    }

    #[test]
    fn zero_attempt_budget_skips_every_slot() {
        let masters = [master(0, 0, 10, 10)];
        let mut rooms = Vec::new();
        let mut stream = RandomStream::new(7);
        let budget = SeedingRules { attempts: 0, ..rules(3) };
        assert_eq!(seed_rooms(&mut stream, MasterRoomId(0), &masters[0], budget, &mut rooms), 0);
        assert!(rooms.is_empty());
    }

    #[test]
    fn lone_room_grows_on_all_four_edges_in_one_pass() {
        let masters = [master(0, 0, 10, 10)];
        let mut rooms = vec![Room { rect: Rect::new(3, 3, 3, 3), master: MasterRoomId(0) }];
        assert!(extend_room(&masters, &mut rooms, 0));
        assert_eq!(rooms[0].rect, Rect::new(2, 2, 5, 5));
    }

    #[test]
    fn lone_room_fills_its_master() {
        let masters = [master(-4, 6, 10, 10)];
        let mut rooms = vec![Room { rect: Rect::new(0, 9, 3, 3), master: MasterRoomId(0) }];
        extend_rooms(&masters, &mut rooms, 100);
        assert_eq!(rooms[0].rect, masters[0].rect);
    }

    #[test]
    fn growth_stops_at_a_neighbour() {
        let masters = [master(0, 0, 12, 3)];
        let mut rooms = vec![
            Room { rect: Rect::new(0, 0, 3, 3), master: MasterRoomId(0) },
            Room { rect: Rect::new(8, 0, 3, 3), master: MasterRoomId(0) },
        ];
        extend_rooms(&masters, &mut rooms, 100);

        // The left room may end flush against its neighbour; the right one may not.
        assert_eq!(rooms[0].rect, Rect::new(0, 0, 6, 3));
        assert_eq!(rooms[1].rect, Rect::new(6, 0, 6, 3));
        assert_disjoint(&rooms);
    }

    #[test]
    fn rooms_stay_contained_and_disjoint_after_every_pass() {
        let masters = [master(-12, -12, 24, 24)];
        for seed in [1_u64, 17, 99, 4_096] {
            let mut rooms = Vec::new();
            let mut stream = RandomStream::new(seed);
            seed_rooms(&mut stream, MasterRoomId(0), &masters[0], rules(8), &mut rooms);
            assert_disjoint(&rooms);

            for _ in 0..100 {
                extend_rooms(&masters, &mut rooms, 1);
                assert_disjoint(&rooms);
                for room in &rooms {
                    assert!(masters[0].rect.contains_rect(room.rect), "{room:?} left its master");
                }
            }
        }
    }
}
