use raylib::prelude::*;
use std::collections::HashMap;

use crate::render::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Wood,
    Brick,
}

/// Immutable CPU pixmap used to build fallback textures.
#[derive(Clone)]
struct Pixmap {
    w: u32,
    h: u32,
    px: Vec<Color>,
}

impl Pixmap {
    fn new(w: u32, h: u32, px: Vec<Color>) -> Self { Self { w, h, px } }

    fn to_image(&self) -> Image {
        let mut img = Image::gen_image_color(self.w as i32, self.h as i32, Color::BLACK);
        for y in 0..self.h {
            for x in 0..self.w {
                img.draw_pixel(x as i32, y as i32, self.px[(y * self.w + x) as usize]);
            }
        }
        img
    }
}

pub struct TextureManager {
    textures: HashMap<Surface, Texture2D>,
}

impl TextureManager {
    pub fn new(rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<Self, RenderError> {
        let mut tm = Self { textures: HashMap::new() };

        // first existing file wins; otherwise a procedural pixmap
        let candidates: &[(&str, Surface)] = &[
            ("assets/wood.png", Surface::Wood),
            ("assets/wood.bmp", Surface::Wood),
            ("wood.bmp", Surface::Wood),
            ("assets/brick.png", Surface::Brick),
            ("assets/brick.bmp", Surface::Brick),
            ("brick.bmp", Surface::Brick),
        ];

        for (path, surface) in candidates {
            if tm.textures.contains_key(surface) {
                continue;
            }
            if let Ok(img) = Image::load_image(path) {
                match rl.load_texture_from_image(thread, &img) {
                    Ok(tex) => {
                        log::info!("loaded {surface:?} texture from {path}");
                        tm.textures.insert(*surface, tex);
                    }
                    Err(e) => log::warn!("could not upload {path}: {e}"),
                }
            }
        }

        for surface in [Surface::Wood, Surface::Brick] {
            if tm.textures.contains_key(&surface) {
                continue;
            }
            log::info!("no {surface:?} texture on disk, generating one");
            let pm = match surface {
                Surface::Wood => Self::make_wood_pixmap(64, 64),
                Surface::Brick => Self::make_brick_pixmap(64, 64),
            };
            let tex = rl
                .load_texture_from_image(thread, &pm.to_image())
                .map_err(|e| RenderError::Texture(format!("{surface:?}: {e}")))?;
            tm.textures.insert(surface, tex);
        }

        Ok(tm)
    }

    pub fn get(&self, surface: Surface) -> Option<&Texture2D> {
        self.textures.get(&surface)
    }

    /// Running bond with mortar lines.
    fn make_brick_pixmap(w: u32, h: u32) -> Pixmap {
        let brick = Color::new(150, 60, 45, 255);
        let mortar = Color::new(190, 185, 175, 255);
        let (bw, bh) = (16u32, 8u32);
        let mut px = vec![brick; (w * h) as usize];
        for y in 0..h {
            let course = y / bh;
            let offset = if course % 2 == 0 { 0 } else { bw / 2 };
            for x in 0..w {
                let i = (y * w + x) as usize;
                if y % bh == 0 || (x + offset) % bw == 0 {
                    px[i] = mortar;
                } else {
                    // slight per-brick tint
                    let id = (((x + offset) / bw) * 7 + course * 13) % 5;
                    px[i] = Self::mix(brick, Color::BLACK, (id * 12) as u8);
                }
            }
        }
        Pixmap::new(w, h, px)
    }

    /// Vertical planks with wavy grain.
    fn make_wood_pixmap(w: u32, h: u32) -> Pixmap {
        let light = Color::new(181, 136, 84, 255);
        let dark = Color::new(120, 82, 46, 255);
        let plank = 16u32;
        let mut px = vec![light; (w * h) as usize];
        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) as usize;
                if x % plank == 0 {
                    px[i] = dark;
                    continue;
                }
                let wave = ((y as f32 * 0.35 + (x / plank) as f32 * 1.7).sin() * 2.0) as i32;
                let grain = ((x as i32 + wave).rem_euclid(4)) as u8;
                px[i] = Self::mix(light, dark, grain * 40);
            }
        }
        Pixmap::new(w, h, px)
    }

    #[inline]
    fn mix(a: Color, b: Color, t: u8) -> Color {
        let ta = t as u16;
        let na = 255u16 - ta;
        let mixc = |x: u8, y: u8| -> u8 { (((x as u16) * na + (y as u16) * ta) / 255) as u8 };
        Color::new(mixc(a.r, b.r), mixc(a.g, b.g), mixc(a.b, b.b), mixc(a.a, b.a))
    }
}
