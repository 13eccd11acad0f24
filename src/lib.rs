//! First-person key-and-door maze.

pub mod core;
pub mod render;
