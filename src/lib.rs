pub mod diag;
pub mod error;
pub mod flags;
pub mod shell;

pub mod core;
pub mod input;
pub mod process;
