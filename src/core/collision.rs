//! Collision resolution against the tile grid.
//!
//! `resolve` is both the collision predicate and the trigger for key pickup
//! and door unlocking: asking whether a position can be occupied performs the
//! pickup/unlock as a side effect.
use log::{debug, info, trace};

use crate::core::maze::{Map, WALL, is_door, is_key};

pub const PLAYER_RADIUS: f32 = 0.35;

/// Side of the box checked around an already-picked key.
const KEY_BOX: f32 = 0.3;

/// Axis-aligned box in gameplay space.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
}

impl Bounds {
    fn around(x: f32, y: f32, r: f32) -> Self {
        Self { min_x: x - r, max_x: x + r, min_y: y - r, max_y: y + r }
    }

    fn cell(c: i64, r: i64, size: f32) -> Self {
        let (x, y) = (c as f32, r as f32);
        Self { min_x: x, max_x: x + size, min_y: y, max_y: y + size }
    }

    #[inline]
    fn touches(&self, o: &Bounds) -> bool {
        self.max_x > o.min_x && self.min_x < o.max_x && self.max_y > o.min_y && self.min_y < o.max_y
    }
}

/// Attempts to occupy `(x, y)` (gameplay space, row 0 at the bottom).
/// Returns `true` when the move collides.
pub fn resolve(map: &mut Map, x: f32, y: f32) -> bool {
    if !x.is_finite() || !y.is_finite() {
        trace!("({x}, {y}) is not a position");
        return true;
    }
    let (w, h) = (map.width as i64, map.height as i64);

    // cells past one step outside the grid are out of bounds all the same
    let row_min = ((y - PLAYER_RADIUS).floor() as i64).clamp(-1, h);
    let row_max = ((y + PLAYER_RADIUS).floor() as i64).clamp(-1, h);
    // single column: both ends come from x + radius
    let col_min = ((x + PLAYER_RADIUS).floor() as i64).clamp(-1, w);
    let col_max = ((x + PLAYER_RADIUS).floor() as i64).clamp(-1, w);

    let player = Bounds::around(x, y, PLAYER_RADIUS);

    for r in row_min..=row_max {
        for c in col_min..=col_max {
            let map_row = h - 1 - r;
            if map_row < 0 || map_row >= h || c < 0 || c >= w {
                trace!("({x:.3}, {y:.3}) out of bounds");
                return true;
            }
            let tile = map.grid[map_row as usize][c as usize];

            if tile == WALL {
                if player.touches(&Bounds::cell(c, r, 1.0)) {
                    trace!("wall collision at ({c}, {r})");
                    return true;
                }
            } else if is_key(tile) {
                touch_key(map, tile, &player, c, r);
                return false;
            } else if is_door(tile) {
                return !open_door(map, tile);
            }
        }
    }
    trace!("({x:.3}, {y:.3}) free");
    false
}

/// Picks up the first unpicked key with this id. Keys never block.
fn touch_key(map: &mut Map, id: char, player: &Bounds, c: i64, r: i64) {
    for key in map.keys.iter_mut().filter(|k| k.id == id) {
        if !key.picked {
            key.picked = true;
            info!("key {} has been picked up", key.id);
            return;
        }
        if player.touches(&Bounds::cell(c, r, KEY_BOX)) {
            trace!("standing on held key {}", key.id);
            return;
        }
    }
}

/// Unlocks the first door with this id whose key is held.
/// Returns `false` when the door stays locked.
fn open_door(map: &mut Map, id: char) -> bool {
    let Map { doors, keys, .. } = map;
    for door in doors.iter_mut().filter(|d| d.id == id) {
        if keys.iter().any(|k| k.id == door.key_id && k.picked) {
            if !door.unlocked {
                info!("door {} has been unlocked", door.id);
            }
            door.unlocked = true;
            return true;
        }
    }
    debug!("door {id} needs key {}", id.to_ascii_lowercase());
    false
}
