//! Core types and definitions for the TORNADO weapon simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! stat records, upgrade settings, commands, events, snapshots, errors
//! and constants. It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod settings;
pub mod state;
pub mod stats;
pub mod table;
pub mod types;
