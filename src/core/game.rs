//! One play session: the loaded map, the player and the win state.
use log::info;

use crate::core::maze::{Key, Map};
use crate::core::player::{Player, Step, TURN_STEP};

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("map has no start tile 'S'")]
    NoStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    ToggleOverhead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
}

pub struct Game {
    pub map: Map,
    pub player: Player,
    pub state: GameState,
    /// Top-down debug camera instead of first person.
    pub overhead: bool,
}

impl Game {
    pub fn new(map: Map) -> Result<Self, GameError> {
        let player = Player::spawn(&map).ok_or(GameError::NoStart)?;
        Ok(Self { map, player, state: GameState::Playing, overhead: false })
    }

    /// Applies one input command. Movement returns the step outcome.
    pub fn apply(&mut self, cmd: Command) -> Option<Step> {
        if self.state == GameState::Won {
            return None;
        }
        let step = match cmd {
            Command::Forward => self.player.step(1.0, &mut self.map),
            Command::Backward => self.player.step(-1.0, &mut self.map),
            Command::TurnLeft => {
                self.player.turn(TURN_STEP);
                return None;
            }
            Command::TurnRight => {
                self.player.turn(-TURN_STEP);
                return None;
            }
            Command::ToggleOverhead => {
                self.overhead = !self.overhead;
                return None;
            }
        };
        if step == Step::GoalReached {
            info!("goal reached");
            self.state = GameState::Won;
        }
        Some(step)
    }

    pub fn keys_held(&self) -> impl Iterator<Item = &Key> {
        self.map.keys.iter().filter(|k| k.picked)
    }

    pub fn is_won(&self) -> bool {
        self.state == GameState::Won
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing_east(text: &str) -> Game {
        let mut game = Game::new(Map::parse(text).unwrap()).unwrap();
        game.player.yaw = 0.0;
        game
    }

    fn walk(game: &mut Game, ticks: usize) -> Option<Step> {
        let mut last = None;
        for _ in 0..ticks {
            last = game.apply(Command::Forward);
            if game.is_won() {
                break;
            }
        }
        last
    }

    #[test]
    fn no_start_is_an_error() {
        let map = Map::parse("2 1\n.G").unwrap();
        assert!(matches!(Game::new(map), Err(GameError::NoStart)));
    }

    #[test]
    fn walks_straight_to_goal() {
        let mut game = facing_east("4 1\nS..G");
        assert_eq!(walk(&mut game, 200), Some(Step::GoalReached));
        assert!(game.is_won());
        assert!(game.player.pos.x > 2.9);
    }

    #[test]
    fn key_opens_door_on_the_way() {
        let mut game = facing_east("6 1\nSa.A.G");
        assert_eq!(walk(&mut game, 300), Some(Step::GoalReached));
        assert_eq!(game.keys_held().count(), 1);
        assert!(game.map.doors[0].unlocked);
    }

    #[test]
    fn locked_door_stops_the_player() {
        let mut game = facing_east("5 1\nS.A.G");
        assert_eq!(walk(&mut game, 300), Some(Step::Blocked));
        assert_eq!(game.state, GameState::Playing);
        assert!(game.player.pos.x < 1.7);
        assert!(!game.map.doors[0].unlocked);
    }

    #[test]
    fn commands_ignored_after_win() {
        let mut game = facing_east("2 1\nSG");
        walk(&mut game, 100);
        assert!(game.is_won());
        let pos = game.player.pos;
        assert_eq!(game.apply(Command::Backward), None);
        assert_eq!(game.player.pos.x, pos.x);
    }

    #[test]
    fn turning_and_overhead_toggle() {
        let mut game = facing_east("2 1\nS.");
        assert_eq!(game.apply(Command::TurnLeft), None);
        assert_eq!(game.player.yaw, TURN_STEP);
        game.apply(Command::TurnRight);
        game.apply(Command::TurnRight);
        assert_eq!(game.player.yaw, -TURN_STEP);
        game.apply(Command::ToggleOverhead);
        assert!(game.overhead);
    }
}
