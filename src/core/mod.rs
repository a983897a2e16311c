pub mod commands;
pub mod types;
