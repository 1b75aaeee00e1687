//! Subcommand implementations

pub(crate) mod describe;
pub(crate) mod power;
pub(crate) mod ttest;
