//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod run;

pub use args::{Action, Cli, Commands, PageArgs};
