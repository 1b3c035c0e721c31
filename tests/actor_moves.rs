mod common;

use chutes::{Actor, ActorKind, ActorParams, Board, Die, Movement, RandomDie};
use common::ScriptedDie;

#[test]
fn standard_move_is_roll_plus_one_adjustment() {
    let board = Board::default();
    for start in 0..85 {
        for roll in 1..=6 {
            let mut die = ScriptedDie::new(&[roll]);
            let landed = start + roll;
            let expected = landed + board.adjust(landed);
            let position = ActorKind::Standard
                .into_boxed_movement(&ActorParams::default())
                .advance(start, &board, &mut die)
                .unwrap();
            assert_eq!(position, expected, "start {start}, roll {roll}");
        }
    }
}

#[test]
fn standard_actor_at_20_rolling_4_slides_to_5() {
    let board = Board::default();
    let mut actor = Actor::new(ActorKind::Standard, &ActorParams::default());
    let mut die = ScriptedDie::new(&[6, 6, 6, 2]);
    for _ in 0..4 {
        actor.take_turn(&board, &mut die).unwrap();
    }
    // 6, 12, 18, 20
    assert_eq!(actor.position(), 20);

    let mut die = ScriptedDie::new(&[4]);
    assert_eq!(actor.take_turn(&board, &mut die).unwrap(), 5);
}

#[test]
fn resilient_extra_steps_are_configurable() {
    let board = Board::default();
    let params = ActorParams::default().with_extra_steps(3);
    let movement = ActorKind::Resilient.into_boxed_movement(&params);
    let mut die = ScriptedDie::new(&[4, 5]);
    // 24 -> 5, +3 extra, +5 = 13
    assert_eq!(movement.advance(20, &board, &mut die).unwrap(), 13);
    assert_eq!(die.remaining(), 0);
}

#[test]
fn lazy_dropped_steps_are_configurable() {
    let board = Board::default();
    let params = ActorParams::default().with_dropped_steps(3);
    let movement = ActorKind::Lazy.into_boxed_movement(&params);

    // 0 + 1 -> 40, roll 3 does not beat 3: stays on 40
    let mut die = ScriptedDie::new(&[1, 3]);
    assert_eq!(movement.advance(0, &board, &mut die).unwrap(), 40);

    // 0 + 1 -> 40, roll 6: 40 - 3 + 6 = 43 -> 62, roll 2 discarded
    let mut die = ScriptedDie::new(&[1, 6, 2]);
    assert_eq!(movement.advance(0, &board, &mut die).unwrap(), 62);
}

#[test]
fn resilient_never_ends_a_move_on_a_chute_start() {
    let board = Board::default();
    let chute_starts: Vec<i32> = board.chutes().map(|t| t.start).collect();
    let mut die = RandomDie::new(Some(2024));
    let movement = ActorKind::Resilient.into_boxed_movement(&ActorParams::default());
    for start in 0..84 {
        for _ in 0..20 {
            let position = movement.advance(start, &board, &mut die).unwrap();
            assert!(!chute_starts.contains(&position));
        }
    }
}

#[test]
fn lazy_never_ends_a_move_on_a_ladder_start() {
    let board = Board::default();
    let ladder_starts: Vec<i32> = board.ladders().map(|t| t.start).collect();
    let mut die = RandomDie::new(Some(4048));
    let movement = ActorKind::Lazy.into_boxed_movement(&ActorParams::default());
    for start in 0..84 {
        for _ in 0..20 {
            let position = movement.advance(start, &board, &mut die).unwrap();
            assert!(!ladder_starts.contains(&position));
        }
    }
}

#[test]
fn custom_movement_can_drive_an_actor() {
    #[derive(Debug)]
    struct Hop;

    impl Movement for Hop {
        fn kind(&self) -> ActorKind {
            ActorKind::Standard
        }

        fn advance(
            &self,
            position: i32,
            _board: &Board,
            die: &mut dyn Die,
        ) -> chutes::Result<i32> {
            Ok(position + 2 * die.roll())
        }
    }

    let board = Board::default();
    let mut actor = Actor::with_movement(Box::new(Hop));
    let mut die = ScriptedDie::new(&[3]);
    assert_eq!(actor.take_turn(&board, &mut die).unwrap(), 6);
}
