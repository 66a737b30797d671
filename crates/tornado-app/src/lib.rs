//! Headless host for the tornado weapon simulation.

pub mod config;
pub mod game_loop;
pub mod state;
pub mod targets;

pub use tornado_core as core;
