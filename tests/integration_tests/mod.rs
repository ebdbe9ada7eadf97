pub mod cli;
pub mod persistence;
