// Player: billboard sprite + vertical physics + animation selection
//
// This module contains everything that drives the player character:
// - Vertical physics (gravity, jump, floor collision)
// - Animation timing against the sprite sheet
// - Facing resolution from movement intent
// - The per-frame controller tying them together

pub mod animation;
pub mod controller;
pub mod facing;
pub mod physics;

// Re-export commonly used types
pub use animation::{AnimationClock, SpriteSheet};
pub use controller::{MoveInput, PlayerController, PlayerPose, MOVE_SPEED};
pub use facing::{Facing, FacingResolver};
pub use physics::VerticalPhysics;

use glam::Vec3;

/// Sprite sheet frame columns
pub const SHEET_COLS: u32 = 8;
/// Sprite sheet animation rows
pub const SHEET_ROWS: u32 = 8;
/// Frames in the walk cycle
pub const WALK_FRAME_COUNT: u32 = 8;
/// Seconds each walk frame is shown
pub const WALK_FRAME_DURATION: f32 = 0.1;

/// The player character. Owned by the game loop and mutated once per frame
/// by [`PlayerController::update`].
#[derive(Debug, Clone)]
pub struct Player {
    /// World-space position of the sprite center
    pub position: Vec3,
    pub physics: VerticalPhysics,
    pub clock: AnimationClock,
    pub facing: FacingResolver,
    pub sheet: SpriteSheet,
    /// Currently selected sprite sheet row
    pub active_row: u32,
    /// Current discrete facing bucket (0..=4)
    pub facing_index: u32,
}

impl Player {
    /// Spawn the player at rest on the given floor.
    pub fn new(floor_y: f32) -> Self {
        let physics = VerticalPhysics::new(floor_y, 1.0);
        let position = Vec3::new(0.0, physics.rest_y(), 0.0);
        let facing = FacingResolver::new();

        Self {
            position,
            physics,
            clock: AnimationClock::new(WALK_FRAME_COUNT, WALK_FRAME_DURATION),
            facing,
            sheet: SpriteSheet::new(SHEET_COLS, SHEET_ROWS),
            // Matches the initial camera-facing heading
            active_row: 4,
            facing_index: 4,
        }
    }

    /// Height of the player above the floor plane.
    pub fn height_above_floor(&self) -> f32 {
        (self.position.y - self.physics.rest_y()).max(0.0)
    }
}
