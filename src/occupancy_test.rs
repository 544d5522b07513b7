#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn r(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::new(x, y, w, h)
}

fn place(index: &mut OccupancyIndex, rect: Rect) -> PieceId {
    let id = Uuid::new_v4();
    index.register(id, rect);
    id
}

/// Every present coarse/medium cell must have a non-empty fine cell inside it.
fn assert_no_stale_flags(index: &OccupancyIndex) {
    for (origin, _) in index.coarse.iter() {
        assert!(index.fine_occupied_within(&index.coarse.cell_rect(origin)), "stale coarse cell at {origin:?}");
    }
    for (origin, _) in index.medium.iter() {
        assert!(index.fine_occupied_within(&index.medium.cell_rect(origin)), "stale medium cell at {origin:?}");
    }
}

/// Every non-empty fine cell must be covered by present coarse and medium cells.
fn assert_no_false_negatives(index: &OccupancyIndex) {
    for (origin, entries) in index.fine.iter() {
        assert!(!entries.is_empty());
        assert!(index.coarse.has(origin), "coarse missing at {origin:?}");
        assert!(index.medium.has(origin), "medium missing at {origin:?}");
    }
}

// =============================================================
// Empty index
// =============================================================

#[test]
fn empty_index_never_collides() {
    let index = OccupancyIndex::default();
    assert!(index.is_empty());
    assert!(!index.is_colliding(&r(0.0, 0.0, 1000.0, 1000.0), None));
}

// =============================================================
// Self collision
// =============================================================

#[test]
fn registered_piece_collides_with_itself() {
    let mut index = OccupancyIndex::default();
    let rect = r(120.0, 80.0, 300.0, 200.0);
    let id = place(&mut index, rect);
    assert!(index.is_colliding(&rect, None));
    assert!(!index.is_colliding(&rect, Some(id)));
}

#[test]
fn excluding_self_still_detects_others() {
    let mut index = OccupancyIndex::default();
    let a = r(0.0, 0.0, 100.0, 100.0);
    let b = r(150.0, 0.0, 100.0, 100.0);
    let a_id = place(&mut index, a);
    place(&mut index, b);
    // Move `a` so it overlaps `b`.
    assert!(index.is_colliding(&r(120.0, 0.0, 100.0, 100.0), Some(a_id)));
}

// =============================================================
// Placement scenarios
// =============================================================

#[test]
fn overlapping_grass_tile_collides() {
    let mut index = OccupancyIndex::default();
    place(&mut index, r(0.0, 0.0, 1000.0, 560.0));
    assert!(index.is_colliding(&r(500.0, 280.0, 1000.0, 560.0), None));
}

#[test]
fn edge_touching_grass_tile_is_clear() {
    let mut index = OccupancyIndex::default();
    place(&mut index, r(0.0, 0.0, 1000.0, 560.0));
    assert!(!index.is_colliding(&r(1000.0, 0.0, 1000.0, 560.0), None));
    assert!(!index.is_colliding(&r(0.0, 560.0, 1000.0, 560.0), None));
    assert!(!index.is_colliding(&r(-1000.0, 0.0, 1000.0, 560.0), None));
}

#[test]
fn non_overlapping_pieces_do_not_collide_with_each_other() {
    let mut index = OccupancyIndex::default();
    let a = r(0.0, 0.0, 1000.0, 560.0);
    let b = r(1000.0, 0.0, 1000.0, 560.0);
    let a_id = place(&mut index, a);
    let b_id = place(&mut index, b);
    assert!(!index.is_colliding(&a, Some(a_id)));
    assert!(!index.is_colliding(&b, Some(b_id)));
}

#[test]
fn distant_candidate_is_pruned_at_coarse_level() {
    let mut index = OccupancyIndex::default();
    place(&mut index, r(0.0, 0.0, 100.0, 100.0));
    assert!(!index.is_colliding(&r(5000.0, 5000.0, 100.0, 100.0), None));
}

#[test]
fn same_coarse_cell_but_no_overlap() {
    let mut index = OccupancyIndex::default();
    place(&mut index, r(0.0, 0.0, 40.0, 40.0));
    assert!(!index.is_colliding(&r(300.0, 300.0, 40.0, 40.0), None));
}

#[test]
fn same_fine_cell_but_no_overlap() {
    let mut index = OccupancyIndex::default();
    place(&mut index, r(0.0, 0.0, 10.0, 10.0));
    assert!(!index.is_colliding(&r(20.0, 20.0, 10.0, 10.0), None));
    assert!(index.is_colliding(&r(5.0, 5.0, 10.0, 10.0), None));
}

#[test]
fn huge_candidate_finds_tiny_piece() {
    let mut index = OccupancyIndex::default();
    place(&mut index, r(3210.0, -4470.0, 1.0, 1.0));
    assert!(index.is_colliding(&r(-10_000.0, -10_000.0, 20_000.0, 20_000.0), None));
}

#[test]
fn tiny_candidate_inside_huge_piece() {
    let mut index = OccupancyIndex::default();
    place(&mut index, r(-2000.0, -2000.0, 4000.0, 4000.0));
    assert!(index.is_colliding(&r(1234.0, -987.0, 1.0, 1.0), None));
}

#[test]
fn candidate_spanning_many_cells_detects_overlap_in_any_cell() {
    let mut index = OccupancyIndex::default();
    for i in 0..10 {
        place(&mut index, r(f64::from(i) * 700.0, 0.0, 50.0, 50.0));
    }
    // Only the last piece (x = 6300) overlaps this strip.
    assert!(index.is_colliding(&r(6320.0, 10.0, 2000.0, 10.0), None));
    assert!(!index.is_colliding(&r(6400.0, 10.0, 2000.0, 10.0), None));
}

#[test]
fn negative_coordinates_collide() {
    let mut index = OccupancyIndex::default();
    place(&mut index, r(-600.0, -300.0, 200.0, 100.0));
    assert!(index.is_colliding(&r(-450.0, -250.0, 10.0, 10.0), None));
    assert!(!index.is_colliding(&r(-400.0, -300.0, 10.0, 10.0), None));
}

#[test]
fn degenerate_candidate_never_collides() {
    let mut index = OccupancyIndex::default();
    place(&mut index, r(0.0, 0.0, 100.0, 100.0));
    assert!(!index.is_colliding(&r(50.0, 50.0, 0.0, 10.0), None));
}

#[test]
fn dense_grid_of_tiles_matches_brute_force() {
    let mut index = OccupancyIndex::default();
    let mut placed = Vec::new();
    for gx in 0..6 {
        for gy in 0..6 {
            let rect = r(f64::from(gx) * 170.0, f64::from(gy) * 130.0, 120.0, 90.0);
            place(&mut index, rect);
            placed.push(rect);
        }
    }
    let probes = [
        r(100.0, 80.0, 30.0, 30.0),
        r(121.0, 91.0, 48.0, 38.0),
        r(120.0, 0.0, 50.0, 1000.0),
        r(0.0, 90.0, 1000.0, 40.0),
        r(850.0, 650.0, 500.0, 500.0),
        r(-100.0, -100.0, 100.0, 100.0),
        r(500.0, 500.0, 1.0, 1.0),
    ];
    for probe in &probes {
        let expected = placed.iter().any(|p| p.overlaps(probe));
        assert_eq!(index.is_colliding(probe, None), expected, "probe {probe:?}");
    }
}

// =============================================================
// Filtered queries
// =============================================================

#[test]
fn skip_filter_suppresses_specific_entries() {
    let mut index = OccupancyIndex::default();
    let a = place(&mut index, r(0.0, 0.0, 100.0, 100.0));
    let b = place(&mut index, r(100.0, 0.0, 100.0, 100.0));
    let candidate = r(50.0, 0.0, 100.0, 100.0);
    assert!(index.is_colliding_where(&candidate, |e| e.id == a));
    assert!(!index.is_colliding_where(&candidate, |e| e.id == a || e.id == b));
}

#[test]
fn bridged_piece_may_overlap_its_partner() {
    use crate::piece::{Bridge, BackgroundPiece};

    let mut index = OccupancyIndex::default();
    let a = place(&mut index, r(0.0, 0.0, 100.0, 100.0));
    let c = place(&mut index, r(300.0, 0.0, 100.0, 100.0));
    let id = Uuid::new_v4();
    let mut piece = BackgroundPiece { id, rect: r(80.0, 0.0, 100.0, 100.0), src: "tile.png".into(), bridges: Vec::new() };
    assert!(index.is_colliding_piece(&piece));

    piece.bridges.push(Bridge { rect: r(80.0, 0.0, 20.0, 100.0), connecting: (a, id) });
    assert!(!index.is_colliding_piece(&piece));

    // A bridge to someone else does not help.
    piece.rect = r(290.0, 0.0, 100.0, 100.0);
    assert!(index.is_colliding_piece(&piece));
    piece.bridges.push(Bridge { rect: r(300.0, 0.0, 10.0, 100.0), connecting: (c, id) });
    assert!(!index.is_colliding_piece(&piece));
}

// =============================================================
// Grid invariants
// =============================================================

#[test]
fn register_marks_all_levels() {
    let mut index = OccupancyIndex::default();
    place(&mut index, r(0.0, 0.0, 1000.0, 560.0));
    assert_no_false_negatives(&index);
    assert_no_stale_flags(&index);
    assert!(index.coarse.has(Vec2::new(999.0, 559.0)));
    assert!(index.medium.has(Vec2::new(999.0, 559.0)));
}

#[test]
fn register_appends_to_shared_fine_cells() {
    let mut index = OccupancyIndex::default();
    let a = place(&mut index, r(0.0, 0.0, 10.0, 10.0));
    let b = place(&mut index, r(20.0, 20.0, 10.0, 10.0));
    let ids: Vec<PieceId> = index.entries_at(Vec2::new(1.0, 1.0)).iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[test]
fn entries_at_empty_cell_is_empty() {
    let index = OccupancyIndex::default();
    assert!(index.entries_at(Vec2::new(1.0, 1.0)).is_empty());
}

// =============================================================
// Unregister
// =============================================================

#[test]
fn unregister_frees_the_space() {
    let mut index = OccupancyIndex::default();
    let rect = r(0.0, 0.0, 1000.0, 560.0);
    let id = place(&mut index, rect);
    index.unregister(id, rect);
    assert!(!index.is_colliding(&rect, None));
    assert!(index.is_empty());
    assert!(index.coarse.is_empty());
    assert!(index.medium.is_empty());
}

#[test]
fn unregister_keeps_neighbours_and_their_flags() {
    let mut index = OccupancyIndex::default();
    let a = r(0.0, 0.0, 300.0, 300.0);
    let b = r(300.0, 0.0, 300.0, 300.0);
    let a_id = place(&mut index, a);
    place(&mut index, b);
    index.unregister(a_id, a);
    assert!(!index.is_colliding(&a, None));
    assert!(index.is_colliding(&b, None));
    assert_no_false_negatives(&index);
    assert_no_stale_flags(&index);
}

#[test]
fn unregister_then_register_elsewhere() {
    let mut index = OccupancyIndex::default();
    let old = r(0.0, 0.0, 100.0, 100.0);
    let new = r(2000.0, 2000.0, 100.0, 100.0);
    let id = place(&mut index, old);
    index.unregister(id, old);
    index.register(id, new);
    assert!(!index.is_colliding(&old, None));
    assert!(index.is_colliding(&new, None));
    assert!(!index.is_colliding(&new, Some(id)));
    assert_no_stale_flags(&index);
}
