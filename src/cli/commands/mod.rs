//! Subcommands of the `chutes` binary

pub mod classic;
pub mod simulate;
