//! Headless run: drives the simulation without a renderer, holding the
//! right-arrow drive key, and logs the player's progress once a second.
//!
//! Run with: cargo run --package scree --bin headless

use scree::{Game, KeySet};
use scree_core::EcsError;
use scree_procedural::WorldSeed;
use scree_shared::{LevelConfig, Vec2};

const FRAMES: u64 = 600;
const FRAMES_PER_REPORT: u64 = 60;

fn main() -> Result<(), EcsError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut keys = KeySet::new();
    keys.press("d");

    let mut game = Game::new(
        WorldSeed::default(),
        LevelConfig::default(),
        Vec2::new(800.0, 600.0),
        Box::new(keys),
    )?;

    while game.frame() < FRAMES && game.is_running() {
        game.run(FRAMES_PER_REPORT);
        if !game.is_running() {
            break;
        }

        let position = game
            .ecs()
            .components(game.player())
            .map(|container| container.transform.position)?;
        tracing::info!(
            frame = game.frame(),
            x = position.x,
            y = position.y,
            frontier = game.context().terrain.frontier(),
            draw_commands = game.draw_list().len(),
            "progress"
        );
    }

    Ok(())
}
