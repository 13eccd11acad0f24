use raylib::prelude::*;

use crate::core::game::Game;

pub fn draw_hud(d: &mut RaylibDrawHandle, game: &Game) {
    let fps_now = d.get_fps();
    d.draw_text(&format!("FPS: {}", fps_now), 10, 10, 20, Color::WHITE);

    let keys: String = game.keys_held().map(|k| k.id).collect();
    if !keys.is_empty() {
        d.draw_text(&format!("KEYS: {}", keys), 10, 40, 20, Color::GOLD);
    }
    if game.overhead {
        d.draw_text("OVERHEAD", 10, 70, 20, Color::RED);
    }

    if game.is_won() {
        let (w, h) = (d.get_screen_width(), d.get_screen_height());
        d.draw_rectangle(0, h / 2 - 50, w, 100, Color::new(0, 0, 0, 180));
        d.draw_text("Goal reached!", w / 2 - 110, h / 2 - 35, 40, Color::GREEN);
        d.draw_text("press Enter or Q to quit", w / 2 - 120, h / 2 + 15, 20, Color::WHITE);
    }
}
