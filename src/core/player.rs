use raylib::prelude::*;

use crate::core::collision::{PLAYER_RADIUS, resolve};
use crate::core::maze::Map;

/// World units per movement tick.
pub const MOVE_STEP: f32 = 0.05;
/// Degrees per turning tick.
pub const TURN_STEP: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Blocked,
    Moved,
    GoalReached,
}

#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// Gameplay space: x = column, y = row counted from the bottom.
    pub pos: Vector2,
    pub yaw: f32, // degrees, 90 = +y
}

impl Player {
    pub fn new(x: f32, y: f32, yaw: f32) -> Self {
        Self { pos: Vector2::new(x, y), yaw }
    }

    /// Centre of the start tile, facing +y. `None` if the map has no start.
    pub fn spawn(map: &Map) -> Option<Self> {
        let (x, y) = map.tile_center(map.start?);
        Some(Self::new(x, y, 90.0))
    }

    pub fn forward(&self) -> Vector2 {
        let a = self.yaw.to_radians();
        Vector2::new(a.cos(), a.sin())
    }

    pub fn turn(&mut self, degrees: f32) {
        self.yaw += degrees;
    }

    /// Tries one step along the facing (`dir` = 1.0 forward, -1.0 back).
    /// The position only changes when the resolver lets it.
    pub fn step(&mut self, dir: f32, map: &mut Map) -> Step {
        let f = self.forward();
        let x = (self.pos.x + f.x * MOVE_STEP * dir)
            .clamp(PLAYER_RADIUS, map.width as f32 - PLAYER_RADIUS);
        let y = (self.pos.y + f.y * MOVE_STEP * dir)
            .clamp(PLAYER_RADIUS, map.height as f32 - PLAYER_RADIUS);
        log::trace!("attempted move: x = {x:.3}, y = {y:.3}");

        if resolve(map, x, y) {
            return Step::Blocked;
        }
        self.pos = Vector2::new(x, y);
        if map.reaches_goal(x, y) { Step::GoalReached } else { Step::Moved }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_on_start_tile_center() {
        let map = Map::parse("3 2\n..S\n...").unwrap();
        let p = Player::spawn(&map).unwrap();
        assert_eq!((p.pos.x, p.pos.y), (2.5, 1.5));
        assert_eq!(p.yaw, 90.0);

        let no_start = Map::parse("1 1\n.").unwrap();
        assert!(Player::spawn(&no_start).is_none());
    }

    #[test]
    fn step_moves_along_facing() {
        let mut map = Map::parse("1 3\n.\nS\n.").unwrap();
        let mut p = Player::spawn(&map).unwrap();
        assert_eq!(p.step(1.0, &mut map), Step::Moved);
        assert!((p.pos.y - 1.55).abs() < 1e-5);
        assert!((p.pos.x - 0.5).abs() < 1e-5);
        assert_eq!(p.step(-1.0, &mut map), Step::Moved);
        assert!((p.pos.y - 1.5).abs() < 1e-5);
    }

    #[test]
    fn blocked_step_keeps_position() {
        let mut map = Map::parse("3 1\n.AS").unwrap();
        let mut p = Player::new(0.7, 0.5, 0.0);
        assert_eq!(p.step(1.0, &mut map), Step::Blocked);
        assert_eq!((p.pos.x, p.pos.y), (0.7, 0.5));
    }

    #[test]
    fn attempts_are_clamped_inside_the_map() {
        let mut map = Map::parse("2 1\nS.").unwrap();
        let mut p = Player::new(0.36, 0.5, 180.0);
        assert_eq!(p.step(1.0, &mut map), Step::Moved);
        assert!((p.pos.x - PLAYER_RADIUS).abs() < 1e-6);
    }

    #[test]
    fn turning_accumulates_yaw() {
        let mut p = Player::new(0.5, 0.5, 90.0);
        p.turn(TURN_STEP);
        p.turn(-2.0 * TURN_STEP);
        assert_eq!(p.yaw, 90.0 - TURN_STEP);
    }
}
