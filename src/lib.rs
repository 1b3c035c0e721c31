//! Chutes and ladders simulator
//!
//! This crate provides:
//! - A validated board of chutes and ladders with the classic 90-square layout
//! - Three interchangeable player movement strategies (standard, resilient, lazy)
//! - A game driver with strict turn order and first-to-goal tie-breaking
//! - Experiments that run many games and aggregate results per player kind
//! - Summary statistics, observers and a command-line front end

pub mod actor;
pub mod board;
pub mod cli;
pub mod die;
pub mod error;
pub mod experiment;
pub mod game;
pub mod observer;
pub mod stats;

pub use actor::{
    Actor, ActorKind, ActorParams, LazyMovement, Movement, ResilientMovement, StandardMovement,
};
pub use board::{
    Board, BoardConfig, DEFAULT_CHUTES, DEFAULT_GOAL, DEFAULT_LADDERS, Square, Transition,
};
pub use die::{Die, RandomDie};
pub use error::{Error, Result};
pub use experiment::{Experiment, ExperimentConfig, SeedPolicy};
pub use game::{Game, GameRecord, GameState};
pub use observer::{JsonlObserver, Observer, ProgressObserver};
pub use stats::{DurationSummary, ExperimentReport, KindReport};
