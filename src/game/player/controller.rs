// Per-frame orchestration of movement, facing, animation and physics

use glam::{Vec2, Vec3};

use crate::engine::renderer::camera::GroundBasis;

use super::Player;

/// Horizontal movement speed in units per second
pub const MOVE_SPEED: f32 = 3.0;

/// Directional and jump intent for one frame, derived from raw key state.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Edge-triggered: true only on the frame the jump key went down
    pub jump: bool,
}

impl MoveInput {
    /// Whether any directional key is held this frame.
    pub fn is_moving(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Everything the renderer needs to draw the player this frame.
#[derive(Debug, Clone, Copy)]
pub struct PlayerPose {
    pub position: Vec3,
    pub active_row: u32,
    pub frame_index: u32,
    /// Flat sheet index, `active_row * cols + frame_index`
    pub frame_number: u32,
    /// +1 right, -1 left; -1 mirrors the sprite horizontally
    pub facing_direction: i8,
    pub grounded: bool,
    /// Quad edge length in world units
    pub size: f32,
    /// Distance of the sprite bottom above the floor, for the shadow
    pub height_above_floor: f32,
}

/// Stateless driver for the player's per-frame update.
pub struct PlayerController;

impl PlayerController {
    /// Run one frame of the player simulation.
    ///
    /// Order matters: horizontal displacement and intent accumulation,
    /// then jump, then facing/row resolution, then animation, then
    /// vertical integration.
    pub fn update(player: &mut Player, input: &MoveInput, basis: &GroundBasis, dt: f32) {
        let step = MOVE_SPEED * dt;
        let mut dir2 = Vec2::ZERO;

        // Mirror command is assigned per key in W, S, A, D order: forward,
        // back and right strafe all report +1 while only left strafe
        // reports -1. Inherited from the original build and pinned by a
        // test; do not "fix" without changing the sprite sheet assumptions.
        let mut mirror: i8 = 0;

        if input.forward {
            player.position += basis.forward * step;
            dir2.y += 1.0;
            mirror = 1;
        }
        if input.back {
            player.position -= basis.forward * step;
            dir2.y -= 1.0;
            mirror = 1;
        }
        if input.left {
            player.position -= basis.right * step;
            dir2.x -= 1.0;
            mirror = -1;
        }
        if input.right {
            player.position += basis.right * step;
            dir2.x += 1.0;
            mirror = 1;
        }

        if input.jump {
            player.physics.jump();
        }

        let moving = input.is_moving();
        let facing = player.facing.resolve(dir2, moving);
        player.facing_index = facing.index;
        if facing.active_row != player.active_row {
            player.active_row = facing.active_row;
            player.clock.reset();
        }

        player.clock.advance(dt, moving, mirror);
        player.physics.integrate(&mut player.position, dt);
    }

    /// Snapshot the renderable pose after an update.
    pub fn pose(player: &Player) -> PlayerPose {
        let frame_index = player.clock.frame_index();
        PlayerPose {
            position: player.position,
            active_row: player.active_row,
            frame_index,
            frame_number: player.sheet.frame_number(player.active_row, frame_index),
            facing_direction: player.clock.facing_direction(),
            grounded: player.physics.is_grounded(),
            size: player.physics.height,
            height_above_floor: player.height_above_floor(),
        }
    }
}
