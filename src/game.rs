//! Single playthrough
//!
//! Actors move one at a time in turn order. The goal is checked right after
//! every individual move, so the first actor in turn order to reach it wins
//! and nobody after it in the same round moves.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    actor::{Actor, ActorKind},
    board::Board,
    die::Die,
};

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Running,
    Finished(GameRecord),
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRecord {
    /// Individual actor moves made, including the winning one.
    pub moves: usize,
    /// Kind of the winning actor.
    pub winner: ActorKind,
    /// Index of the winner in this game's turn order.
    pub seat: usize,
}

/// One playthrough on a borrowed board
#[derive(Debug)]
pub struct Game<'a> {
    board: &'a Board,
    actors: Vec<Actor>,
    moves: usize,
    next_seat: usize,
    state: GameState,
    max_moves: Option<usize>,
}

impl<'a> Game<'a> {
    /// New game with the actors in turn order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActors`] if `actors` is empty.
    pub fn new(board: &'a Board, actors: Vec<Actor>) -> Result<Self> {
        if actors.is_empty() {
            return Err(Error::NoActors);
        }
        Ok(Self {
            board,
            actors,
            moves: 0,
            next_seat: 0,
            state: GameState::Running,
            max_moves: None,
        })
    }

    /// Fail with [`Error::MoveLimitExceeded`] instead of playing past `limit` moves.
    pub fn with_move_limit(mut self, limit: Option<usize>) -> Self {
        self.max_moves = limit;
        self
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn board(&self) -> &Board {
        self.board
    }

    /// Let the next actor in turn order move once.
    ///
    /// Returns the record once the move ends the game.
    pub fn step(&mut self, die: &mut dyn Die) -> Result<Option<GameRecord>> {
        if let GameState::Finished(_) = self.state {
            return Err(Error::GameFinished);
        }
        if let Some(limit) = self.max_moves
            && self.moves >= limit
        {
            return Err(Error::MoveLimitExceeded { limit });
        }

        let seat = self.next_seat;
        let actor = &mut self.actors[seat];
        let position = actor.take_turn(self.board, die)?;
        self.moves += 1;

        if self.board.reached(position) {
            let record = GameRecord {
                moves: self.moves,
                winner: actor.kind(),
                seat,
            };
            self.state = GameState::Finished(record);
            return Ok(Some(record));
        }

        self.next_seat = (seat + 1) % self.actors.len();
        Ok(None)
    }

    /// Play every remaining move until someone reaches the goal.
    pub fn play(&mut self, die: &mut dyn Die) -> Result<GameRecord> {
        loop {
            if let Some(record) = self.step(die)? {
                debug!(
                    moves = record.moves,
                    winner = %record.winner,
                    seat = record.seat,
                    "game finished"
                );
                return Ok(record);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorParams;

    struct Fixed(Vec<i32>, usize);

    impl Die for Fixed {
        fn roll(&mut self) -> i32 {
            let roll = self.0[self.1 % self.0.len()];
            self.1 += 1;
            roll
        }
    }

    fn open_board(goal: i32) -> Board {
        Board::new(Some(&[]), Some(&[]), Some(goal)).unwrap()
    }

    fn standard_actors(count: usize) -> Vec<Actor> {
        (0..count)
            .map(|_| Actor::new(ActorKind::Standard, &ActorParams::default()))
            .collect()
    }

    #[test]
    fn empty_game_is_rejected() {
        let board = Board::default();
        assert!(matches!(Game::new(&board, Vec::new()), Err(Error::NoActors)));
    }

    #[test]
    fn counts_every_individual_move() {
        let board = open_board(10);
        let mut game = Game::new(&board, standard_actors(2)).unwrap();
        // each roll is 3: seat 0 reaches 3, 6, 9, 12 on its 4th turn (7th move)
        let record = game.play(&mut Fixed(vec![3], 0)).unwrap();
        assert_eq!(record.moves, 7);
        assert_eq!(record.seat, 0);
        assert_eq!(game.state(), GameState::Finished(record));
    }

    #[test]
    fn finished_game_refuses_more_moves() {
        let board = open_board(1);
        let mut game = Game::new(&board, standard_actors(1)).unwrap();
        let mut die = Fixed(vec![6], 0);
        game.play(&mut die).unwrap();
        assert!(matches!(game.step(&mut die), Err(Error::GameFinished)));
    }

    #[test]
    fn move_limit_stops_long_games() {
        let board = open_board(1_000);
        let mut game = Game::new(&board, standard_actors(2))
            .unwrap()
            .with_move_limit(Some(5));
        let err = game.play(&mut Fixed(vec![1], 0)).unwrap_err();
        assert!(matches!(err, Error::MoveLimitExceeded { limit: 5 }));
        assert_eq!(game.moves(), 5);
    }
}
