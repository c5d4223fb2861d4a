//! Two small terminal games: an arithmetic quiz with a persistent
//! leaderboard, and a joke teller.
//!
//! The controllers in [`quiz`] and [`jokes`] own all game state and only
//! emit events; the binaries render those events and play their sounds.

pub mod config;
pub mod events;
pub mod jokes;
pub mod quiz;
pub mod sound;
