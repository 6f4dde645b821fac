//! Command implementations behind the `kcol-sim` binary.

pub mod commands;
