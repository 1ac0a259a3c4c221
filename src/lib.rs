pub mod annot;
pub mod blast;
pub mod cli;
pub mod commands;
pub mod seq;
pub mod utils;
