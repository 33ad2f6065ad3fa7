//! # Draw-List Extraction
//!
//! Turns world state into plain [`DrawCommand`] values in screen space.
//! The host renderer consumes these; the core never touches pixels.

use scree_core::World;
use scree_procedural::Terrain;

use crate::camera::Camera;
use crate::components::BoxSprite;
use scree_shared::Vec2;

/// One screen-space drawing instruction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// A solid rectangle, top-left anchored.
    Rect {
        /// Screen-space top-left corner.
        position: Vec2,
        /// Width and height.
        dimensions: Vec2,
        /// Fill color as 0xRRGGBB.
        color: u32,
    },
    /// A terrain mesh segment.
    Segment {
        /// Screen-space start point.
        a: Vec2,
        /// Screen-space end point.
        b: Vec2,
    },
}

/// Extracts the frame's draw list: terrain segments first, sprite rects
/// on top.
#[must_use]
pub fn draw_list(world: &World, terrain: &Terrain, camera: &Camera) -> Vec<DrawCommand> {
    let mut commands = Vec::new();

    for chunk in terrain.chunks() {
        for line in chunk.mesh() {
            commands.push(DrawCommand::Segment {
                a: camera.world_to_screen(line.a),
                b: camera.world_to_screen(line.b),
            });
        }
    }

    // Entity iteration order is arbitrary; sort by id so the draw list
    // is identical run to run.
    let mut entities: Vec<_> = world.entities().collect();
    entities.sort_unstable();

    for entity in entities {
        let Ok(container) = world.components(entity) else {
            continue;
        };
        if let Some(sprite) = container.get::<BoxSprite>() {
            commands.push(DrawCommand::Rect {
                position: camera.world_to_screen(container.transform.position),
                dimensions: sprite.dimensions,
                color: sprite.color,
            });
        }
    }

    commands
}
