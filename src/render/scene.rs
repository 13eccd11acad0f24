//! 3D scene: floor, walls, doors, keys and goal drawn from the map each frame.
use rand::Rng;
use raylib::prelude::*;

use crate::core::game::Game;
use crate::core::maze::{Map, TilePos, WALL};
use crate::core::player::Player;
use crate::core::settings::Settings;
use crate::render::RenderError;
use crate::render::textures::{Surface, TextureManager};

const FLOOR: Color = Color::new(30, 30, 34, 255);
const KEY_TINT: Color = Color::new(128, 128, 128, 255);
const FLOOR_Z: f32 = -0.5;

pub struct Scene {
    wall: Model,
    door: Model,
    key: Model,
    goal: Model,
    _textures: TextureManager,
}

fn model_from(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    mesh: Mesh,
    texture: Option<&Texture2D>,
) -> Result<Model, RenderError> {
    // the model takes ownership of the mesh data
    let mut model = rl
        .load_model_from_mesh(thread, unsafe { mesh.make_weak() })
        .map_err(|e| RenderError::Model(e.to_string()))?;
    if let Some(tex) = texture {
        model.materials_mut()[0].set_material_texture(MaterialMapIndex::MATERIAL_MAP_ALBEDO, tex);
    }
    Ok(model)
}

impl Scene {
    pub fn new(rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<Self, RenderError> {
        let textures = TextureManager::new(rl, thread)?;

        let cube = Mesh::gen_mesh_cube(thread, 1.0, 1.0, 1.0);
        let wall = model_from(rl, thread, cube, textures.get(Surface::Brick))?;

        let knot = Mesh::gen_mesh_knot(thread, 0.25, 0.5, 32, 64);
        let door = model_from(rl, thread, knot, textures.get(Surface::Wood))?;

        let torus = Mesh::gen_mesh_torus(thread, 0.2, 0.3, 16, 32);
        let key = model_from(rl, thread, torus, None)?;

        let sphere = Mesh::gen_mesh_sphere(thread, 1.0, 16, 16);
        let goal = model_from(rl, thread, sphere, None)?;

        Ok(Self { wall, door, key, goal, _textures: textures })
    }

    fn camera(game: &Game, settings: &Settings) -> Camera3D {
        let map = &game.map;
        if game.overhead {
            let (cx, cy) = (map.width as f32 / 2.0, map.height as f32 / 2.0);
            return Camera3D::perspective(
                Vector3::new(cx, cy, 20.0),
                Vector3::new(cx, cy, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
                45.0,
            );
        }
        let p = &game.player;
        let f = p.forward();
        let eye = Vector3::new(p.pos.x, p.pos.y, settings.eye_height);
        Camera3D::perspective(
            eye,
            Vector3::new(eye.x + f.x, eye.y + f.y, eye.z),
            Vector3::new(0.0, 0.0, 1.0),
            settings.fov,
        )
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, game: &Game, settings: &Settings) {
        let t = d.get_time() as f32;
        let camera = Self::camera(game, settings);
        let map = &game.map;
        let mut rng = rand::thread_rng();
        let mut d3 = d.begin_mode3D(camera);

        for row in 0..map.height {
            let y = map.grid_row(row) as f32 + 0.5;
            for col in 0..map.width {
                let x = col as f32 + 0.5;
                d3.draw_cube(Vector3::new(x, y, FLOOR_Z), 1.0, 1.0, 0.1, FLOOR);
                if map.grid[row][col] == WALL {
                    d3.draw_model(&self.wall, Vector3::new(x, y, 0.0), 1.0, Color::WHITE);
                }
            }
        }

        for door in map.doors.iter().filter(|door| !door.unlocked) {
            let pos = tile_point(map, door.pos, 0.0);
            d3.draw_model(&self.door, pos, 1.0, Color::WHITE);
        }

        let mut held = 0;
        for key in &map.keys {
            if key.picked {
                let (pos, yaw) = held_key_pose(&game.player, settings, held);
                d3.draw_model_ex(
                    &self.key,
                    pos,
                    Vector3::new(0.0, 0.0, 1.0),
                    yaw,
                    Vector3::new(0.4, 0.4, 0.4),
                    KEY_TINT,
                );
                held += 1;
            } else {
                d3.draw_model_ex(
                    &self.key,
                    tile_point(map, key.pos, 0.0),
                    Vector3::new(0.0, 1.0, 1.0),
                    t * 90.0,
                    Vector3::new(1.0, 1.0, 1.0),
                    KEY_TINT,
                );
            }
        }

        // every 'G' tile, not only the recorded goal
        for goal in map.goal_tiles() {
            let color = Color::new(rng.gen_range(0..=255), rng.gen_range(0..=255), rng.gen_range(0..=255), 255);
            d3.draw_model(&self.goal, tile_point(map, goal, 0.0), 0.2, color);
        }
    }
}

fn tile_point(map: &Map, pos: TilePos, z: f32) -> Vector3 {
    let (x, y) = map.tile_center(pos);
    Vector3::new(x, y, z)
}

/// Held keys float half a unit ahead of the eye, slightly below it, side by side.
fn held_key_pose(player: &Player, settings: &Settings, index: usize) -> (Vector3, f32) {
    let f = player.forward();
    // right of the facing in the xy plane
    let (rx, ry) = (f.y, -f.x);
    let side = index as f32 * 0.12;
    let pos = Vector3::new(
        player.pos.x + f.x * 0.5 + rx * side,
        player.pos.y + f.y * 0.5 + ry * side,
        settings.eye_height - 0.1,
    );
    (pos, player.yaw - 90.0)
}
