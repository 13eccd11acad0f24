use raylib::prelude::*;

use crate::core::game::{Command, Game};
use crate::core::player::Step;
use crate::core::settings::Settings;

const HELD: &[(KeyboardKey, Command)] = &[
    (KeyboardKey::KEY_W, Command::Forward),
    (KeyboardKey::KEY_UP, Command::Forward),
    (KeyboardKey::KEY_S, Command::Backward),
    (KeyboardKey::KEY_DOWN, Command::Backward),
    (KeyboardKey::KEY_A, Command::TurnLeft),
    (KeyboardKey::KEY_LEFT, Command::TurnLeft),
    (KeyboardKey::KEY_D, Command::TurnRight),
    (KeyboardKey::KEY_RIGHT, Command::TurnRight),
];

/// Commands for this frame. Movement and turning repeat while the key is held.
pub fn frame_commands(window: &RaylibHandle) -> Vec<Command> {
    commands_from(|k| window.is_key_down(k), |k| window.is_key_pressed(k))
}

/// Maps key state to commands, one of each at most, in `HELD` order.
pub fn commands_from(
    is_down: impl Fn(KeyboardKey) -> bool,
    is_pressed: impl Fn(KeyboardKey) -> bool,
) -> Vec<Command> {
    let mut cmds: Vec<Command> = Vec::new();
    for &(key, cmd) in HELD {
        if is_down(key) && !cmds.contains(&cmd) {
            cmds.push(cmd);
        }
    }
    if is_pressed(KeyboardKey::KEY_M) {
        cmds.push(Command::ToggleOverhead);
    }
    cmds
}

/// Polls the keyboard and drives the game. Returns `false` when the player
/// asked to quit.
pub fn process_events(window: &mut RaylibHandle, game: &mut Game, settings: &mut Settings) -> bool {
    if window.is_key_pressed(KeyboardKey::KEY_Q) {
        return false;
    }
    if window.is_key_pressed(KeyboardKey::KEY_F) {
        let on = settings.toggle_fullscreen();
        window.toggle_fullscreen();
        log::debug!("fullscreen {}", if on { "on" } else { "off" });
    }
    if game.is_won() {
        return !window.is_key_pressed(KeyboardKey::KEY_ENTER);
    }

    for cmd in frame_commands(window) {
        if let Some(Step::Blocked) = game.apply(cmd) {
            log::trace!("{cmd:?} blocked");
        }
    }
    true
}
