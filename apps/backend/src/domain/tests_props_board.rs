//! Property tests for the tile edge model and board legality (pure domain).
//!
//! Properties tested:
//! - Four clockwise quarter turns restore the original edges
//! - Edge compatibility is symmetric
//! - Occupied cells reject every tile in every rotation
//! - Interior cells with no occupied neighbour reject every tile
//! - Off-board coordinates are rejected without panicking
//! - Every enumerated placement is accepted by `place`

use proptest::prelude::*;

use crate::domain::test_gens;
use crate::domain::tiles::rotated_edge;
use crate::domain::{
    edges_compatible, rotated_edges, test_prelude, Board, Direction, Owner,
    PlacementViolation, Position, Rotation,
};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_rotation_has_order_four(tile in test_gens::tile_type(), start in test_gens::rotation()) {
        let mut r = start;
        for _ in 0..4 {
            r = r.rotate_cw();
        }
        prop_assert_eq!(r, start);
        prop_assert_eq!(rotated_edges(tile, Rotation::Deg0), tile.edges());
    }

    #[test]
    fn prop_single_step_shifts_edges_clockwise(tile in test_gens::tile_type(), r in test_gens::rotation()) {
        let before = rotated_edges(tile, r);
        let after = rotated_edges(tile, r.rotate_cw());
        for d in Direction::ALL {
            // The edge now on side d came from the side counter-clockwise of it.
            let from = Direction::ALL[(d.index() + 3) % 4];
            prop_assert_eq!(after[d.index()], before[from.index()]);
        }
    }

    #[test]
    fn prop_compatibility_is_symmetric(a in test_gens::terrain(), b in test_gens::terrain()) {
        prop_assert_eq!(edges_compatible(a, b), edges_compatible(b, a));
        prop_assert!(edges_compatible(a, a));
    }

    #[test]
    fn prop_occupied_cells_reject(
        tile in test_gens::tile_type(),
        other in test_gens::tile_type(),
    ) {
        let mut board = Board::with_border();
        for r in Rotation::ALL {
            prop_assert!(!board.is_valid_placement(Position::new(0, 0), other, r));
        }
        if let Some((pos, rotation)) = board.valid_placements(tile).first().copied() {
            board.place(pos, tile, rotation, Owner::Player(0)).unwrap();
            for r in Rotation::ALL {
                prop_assert_eq!(
                    board.placement_error(pos, other, r),
                    Some(PlacementViolation::Occupied)
                );
            }
        }
    }

    #[test]
    fn prop_isolated_interior_rejects(
        tile in test_gens::tile_type(),
        rotation in test_gens::rotation(),
        pos in test_gens::interior_position(),
    ) {
        let board = Board::empty();
        prop_assert_eq!(
            board.placement_error(pos, tile, rotation),
            Some(PlacementViolation::Isolated)
        );
    }

    #[test]
    fn prop_off_board_rejects(
        tile in test_gens::tile_type(),
        rotation in test_gens::rotation(),
        pos in test_gens::off_board_position(),
    ) {
        let board = Board::with_border();
        prop_assert!(!board.is_empty_cell(pos));
        prop_assert_eq!(
            board.placement_error(pos, tile, rotation),
            Some(PlacementViolation::OutOfBounds)
        );
    }

    #[test]
    fn prop_enumerated_placements_match_neighbors(tile in test_gens::tile_type()) {
        let board = Board::with_border();
        for (pos, rotation) in board.valid_placements(tile) {
            let mut touching = 0;
            for (dir, n) in board.neighbors(pos) {
                if let Some(neighbor) = board.get(n) {
                    touching += 1;
                    prop_assert_eq!(rotated_edge(tile, rotation, dir), neighbor.edge(dir.opposite()));
                }
            }
            prop_assert!(touching > 0);
            let mut copy = board.clone();
            prop_assert!(copy.place(pos, tile, rotation, Owner::Player(1)).is_ok());
            prop_assert_eq!(copy.compute_score(pos), 1);
        }
    }
}
