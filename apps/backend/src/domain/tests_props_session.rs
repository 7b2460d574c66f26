//! Property tests for session-level invariants (pure domain).
//!
//! Properties tested:
//! - Deck conservation: remaining + held + placed == total after every step
//! - Strict alternation after every successful move and skip
//! - Skips never change scores; scores always equal placed tiles
//! - Failed operations leave the snapshot untouched

use proptest::prelude::*;
use uuid::Uuid;

use crate::domain::test_gens;
use crate::domain::{test_prelude, Deck, GameSession, GameStatus, Position, Rotation};

#[derive(Debug, Clone)]
enum Step {
    Move(Position, Rotation),
    /// Move at the first legal spot for the held tile, if any.
    LegalMove,
    Rotate,
    Skip,
    Joker,
    /// Same intents from the player who does not hold the turn.
    OutOfTurnMove(Position, Rotation),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        1 => (test_gens::position(), test_gens::rotation()).prop_map(|(p, r)| Step::Move(p, r)),
        4 => Just(Step::LegalMove),
        1 => Just(Step::Rotate),
        1 => Just(Step::Skip),
        1 => Just(Step::Joker),
        1 => (test_gens::interior_position(), test_gens::rotation())
            .prop_map(|(p, r)| Step::OutOfTurnMove(p, r)),
    ]
}

const PLAYERS: [&str; 2] = ["p0", "p1"];

fn conserved(s: &GameSession) -> bool {
    let held = usize::from(s.current_tile().is_some());
    s.deck().remaining() + held + s.board().placed_count() == s.deck().total()
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_session_invariants_hold(
        config in test_gens::deck_config(),
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 1..40),
    ) {
        let deck = Deck::with_seed(&config, seed).unwrap();
        let mut s = GameSession::with_deck(Uuid::new_v4(), deck);
        s.join(PLAYERS[0]).unwrap();
        s.join(PLAYERS[1]).unwrap();
        prop_assert!(conserved(&s));

        for step in steps {
            if s.status() == GameStatus::Finished {
                break;
            }
            let Some(cur) = s.current_player() else {
                break;
            };
            let me = PLAYERS[cur];
            let before = s.snapshot();
            let is_skip = matches!(step, Step::Skip);

            let (result, passes_turn) = match step {
                Step::Move(pos, rotation) => {
                    let tile = s.current_tile().map(|t| t.tile_type);
                    match tile {
                        Some(t) => (s.make_move(me, pos, t, rotation).map(|_| ()), true),
                        None => break,
                    }
                }
                Step::LegalMove => {
                    let Some(held) = s.current_tile() else { break };
                    match s.board().valid_placements(held.tile_type).first().copied() {
                        Some((pos, rotation)) => {
                            let r = s.make_move(me, pos, held.tile_type, rotation).map(|_| ());
                            prop_assert!(r.is_ok());
                            (r, true)
                        }
                        None => continue,
                    }
                }
                Step::Rotate => (s.rotate_current_tile(me).map(|_| ()), false),
                Step::Skip => (s.skip_turn(me), true),
                Step::Joker => (s.use_joker(me).map(|_| ()), false),
                Step::OutOfTurnMove(pos, rotation) => {
                    let other = PLAYERS[(cur + 1) % 2];
                    let t = before.current_tile.map(|t| t.tile_type);
                    let r = match t {
                        Some(t) => s.make_move(other, pos, t, rotation).map(|_| ()),
                        None => s.skip_turn(other),
                    };
                    prop_assert!(r.is_err());
                    (r, false)
                }
            };

            prop_assert!(conserved(&s));
            let placed = s.board().placed_count() as u32;
            prop_assert_eq!(s.scores().iter().sum::<u32>(), placed);

            match result {
                Ok(()) if passes_turn => {
                    prop_assert_eq!(s.current_player(), Some((cur + 1) % 2));
                    if is_skip {
                        prop_assert_eq!(s.scores(), before.scores);
                        prop_assert_eq!(s.deck().remaining(), before.tiles_remaining);
                    }
                }
                Ok(()) => {
                    prop_assert_eq!(s.current_player(), Some(cur));
                    prop_assert_eq!(s.deck().remaining(), before.tiles_remaining);
                }
                Err(_) => prop_assert_eq!(s.snapshot(), before),
            }
        }
    }
}
