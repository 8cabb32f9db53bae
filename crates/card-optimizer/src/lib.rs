pub mod catalog;
pub mod config;
pub mod credit;
pub mod error;
pub mod merchant;
pub mod rewards;
pub mod telemetry;
