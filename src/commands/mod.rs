//! `aroc` subcommands.

pub mod ast;
pub mod check;
pub mod common;
pub mod compile;
