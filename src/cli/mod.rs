//! Command-line interface for running chutes and ladders experiments

pub mod commands;
pub mod output;
