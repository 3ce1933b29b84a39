pub mod collectors;
pub mod config;
pub mod runner;
