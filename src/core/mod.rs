//! Core game types and logic (map, collision, player, session, input).
//!
//! Re-exports:
//! - `maze`: Map loading (grid, keys, doors, start, goal)
//! - `collision`: Move resolution with key pickup and door unlocking
//! - `player`: Player position, facing and stepping
//! - `game`: Session state and commands
//! - `settings`: Window/camera settings for the session
//! - `process_events`: Keyboard input

pub mod maze;
pub mod collision;
pub mod player;
pub mod game;
pub mod settings;
pub mod process_events;
