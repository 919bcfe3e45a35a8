//! # Spellforge Main Entry Point
//!
//! Parses the command line, loads the configuration, builds the game state and
//! hands control to the scene manager.

use clap::{Parser, ValueEnum};
use macroquad::prelude::*;
use spellforge::constants::{SCREEN_HEIGHT, SCREEN_TITLE, SCREEN_WIDTH};
use spellforge::{CameraMode, GameConfig, GameState, MovementMode, SceneManager, SpellforgeResult};
use std::path::PathBuf;

/// Movement policy selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum MovementArg {
    /// Keys move along world axes
    Compass,
    /// Keys move relative to the direction of the mouse
    Mouse,
}

impl From<MovementArg> for MovementMode {
    fn from(arg: MovementArg) -> Self {
        match arg {
            MovementArg::Compass => MovementMode::Compass,
            MovementArg::Mouse => MovementMode::Mouse,
        }
    }
}

/// Command line arguments for Spellforge.
#[derive(Parser, Debug)]
#[command(name = "spellforge")]
#[command(about = "Collect elements, craft compound skills and blast obstacles")]
#[command(version)]
struct Args {
    /// Game configuration file
    #[arg(long, default_value = "assets/config/game.json")]
    config: PathBuf,

    /// Random seed for scattered pickups
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the configured movement policy
    #[arg(long, value_enum)]
    movement: Option<MovementArg>,

    /// Keep the camera still and shrink the world to one screen
    #[arg(long)]
    fixed_camera: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: SCREEN_TITLE.to_string(),
        window_width: SCREEN_WIDTH as i32,
        window_height: SCREEN_HEIGHT as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> SpellforgeResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    log::info!("Starting Spellforge v{}", spellforge::VERSION);

    let mut config = GameConfig::load(&args.config)?;
    if let Some(movement) = args.movement {
        config.movement = movement.into();
    }
    let camera_mode = if args.fixed_camera {
        config.world.width = SCREEN_WIDTH;
        config.world.height = SCREEN_HEIGHT;
        CameraMode::Fixed
    } else {
        CameraMode::Follow
    };

    let seed = args.seed.unwrap_or(12345);
    log::info!("Building world with seed {}", seed);
    let game_state = GameState::new(&config, seed)?;

    let mut scenes = SceneManager::new(game_state, camera_mode).await?;
    scenes.run().await?;

    log::info!("Game loop ended");
    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        let filter = tracing_subscriber::EnvFilter::try_new(log_level)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
        tracing::debug!(level = log_level, "tracing subscriber installed");
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_timestamp(None)
            .init();
    }
}
