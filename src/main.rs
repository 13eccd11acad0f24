use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;

use maze3d::core::game::Game;
use maze3d::core::maze::load_map;
use maze3d::core::process_events::process_events;
use maze3d::core::settings::Settings;
use maze3d::render::hud::draw_hud;
use maze3d::render::scene::Scene;

const SKY: Color = Color::new(51, 102, 204, 255);

#[derive(Parser, Debug)]
#[command(version, about = "First-person key-and-door maze", long_about = None)]
struct Args {
    /// Map file to load
    #[arg(value_name = "MAP_FILE")]
    map: PathBuf,

    /// Window width in pixels
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(i32).range(1..))]
    width: i32,

    /// Window height in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(i32).range(1..))]
    height: i32,

    /// Start in fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// Verbose logging
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            window_width: self.width,
            window_height: self.height,
            fullscreen: self.fullscreen,
            debug: self.debug,
            ..Settings::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = args.settings();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings.log_filter()))
        .init();

    let map = load_map(&args.map).with_context(|| format!("loading {}", args.map.display()))?;
    let mut game = Game::new(map).context("starting session")?;

    let (mut window, raylib_thread) = raylib::init()
        .size(settings.window_width, settings.window_height)
        .title("maze3d")
        .build();
    if settings.fullscreen {
        window.toggle_fullscreen();
    }

    let scene = Scene::new(&mut window, &raylib_thread).context("building scene")?;
    log::info!("window {}x{}, press M for the overhead view", settings.window_width, settings.window_height);

    while !window.window_should_close() {
        if !process_events(&mut window, &mut game, &mut settings) {
            break;
        }

        {
            let mut d = window.begin_drawing(&raylib_thread);
            d.clear_background(SKY);
            scene.draw(&mut d, &game, &settings);
            draw_hud(&mut d, &game);
        }

        // ~60 FPS (16 ms)
        thread::sleep(Duration::from_millis(16));
    }

    Ok(())
}
