mod config;
mod error;
mod game;
mod gameplay;
mod generator;
mod model;
mod renderer;

use crate::config::{Args, Settings};
use crate::gameplay::*;
use crate::renderer::Renderer;

use clap::Parser;
use log::{error, info};
use macroquad::input::{KeyCode, MouseButton, is_key_pressed, is_mouse_button_pressed, mouse_position};
use macroquad::window::{Conf, next_frame};
use rand::SeedableRng;
use rand::rngs::StdRng;
use simple_logger::SimpleLogger;

fn window_conf() -> Conf {
    Conf {
        window_title: "Potions".to_owned(),
        window_width: 800,
        window_height: 600,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();
    if let Err(err) = SimpleLogger::new().with_level(args.log_level).init() {
        eprintln!("Logger unavailable: {err}");
    }

    let settings = match Settings::from_args(&args) {
        Ok(settings) => settings,
        Err(err) => {
            error!("Invalid settings: {err}");
            return;
        }
    };
    info!(
        "Starting a session with {} potions, seed {}",
        settings.potion_count, settings.seed
    );

    let rng = StdRng::seed_from_u64(settings.seed);
    let mut engine = match GameEngine::new(&settings, rng) {
        Ok(engine) => engine,
        Err(err) => {
            error!("Could not set up the board: {err}");
            return;
        }
    };
    let mut renderer = Renderer::new(settings.columns);

    loop {
        renderer.autoset_viewport();
        renderer.render_game(engine.game(), engine.buttons());
        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            if let Some(hit) = renderer.get_hit_test_registry().hit_test(x, y) {
                engine.handle_hit_item(hit.item);
            }
        }
        if is_mouse_button_pressed(MouseButton::Right) {
            engine.handle_game_action(ControlAction::Deselect);
        }
        if is_key_pressed(KeyCode::U) {
            engine.handle_game_action(ControlAction::Undo);
        }
        if is_key_pressed(KeyCode::Y) {
            engine.handle_game_action(ControlAction::Redo);
        }
        if is_key_pressed(KeyCode::R) {
            engine.handle_game_action(ControlAction::Restart);
        }
        if is_key_pressed(KeyCode::N) {
            engine.handle_game_action(ControlAction::NewGame);
        }
        next_frame().await;
    }
}
