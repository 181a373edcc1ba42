// Game state: the player walking on the floor plane

pub mod player;

use crate::engine::input::{Action, InputState};
use crate::engine::renderer::{BillboardDraw, Camera};

use player::{MoveInput, Player, PlayerController};

/// Height of the floor plane
pub const FLOOR_Y: f32 = 0.0;

/// Top-level game state, updated once per frame.
///
/// Owns the single camera value used for both movement projection and
/// rendering, so the two can never disagree.
pub struct Game {
    camera: Camera,
    player: Player,
}

impl Game {
    pub fn new(aspect: f32) -> Self {
        Self {
            camera: Camera::fixed_scene_camera(aspect),
            player: Player::new(FLOOR_Y),
        }
    }

    /// Run one frame of simulation from the current input state.
    pub fn update(&mut self, input: &InputState, dt: f32) {
        let move_input = MoveInput {
            forward: input.is_pressed(Action::MoveForward),
            back: input.is_pressed(Action::MoveBack),
            left: input.is_pressed(Action::StrafeLeft),
            right: input.is_pressed(Action::StrafeRight),
            jump: input.just_pressed(Action::Jump),
        };

        let basis = self.camera.ground_basis();
        PlayerController::update(&mut self.player, &move_input, &basis, dt);
    }

    /// The player's billboard draw call for this frame.
    pub fn player_billboard(&self) -> BillboardDraw {
        let pose = PlayerController::pose(&self.player);
        BillboardDraw {
            position: pose.position,
            size: pose.size,
            grid: (self.player.sheet.cols, self.player.sheet.rows),
            frame: (pose.frame_index, pose.active_row),
            mirrored: pose.facing_direction < 0,
            height_above_floor: pose.height_above_floor,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn player(&self) -> &Player {
        &self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 0.016;

    #[test]
    fn test_spawns_grounded_at_origin() {
        let game = Game::new(1.0);
        let billboard = game.player_billboard();
        assert_relative_eq!(billboard.position.y, 0.5);
        assert_eq!(billboard.height_above_floor, 0.0);
        assert_eq!(billboard.frame, (0, 4));
    }

    #[test]
    fn test_held_key_moves_player() {
        let mut game = Game::new(1.0);
        let mut input = InputState::new();
        input.press(Action::MoveForward);

        let start = game.player().position;
        for _ in 0..10 {
            game.update(&input, DT);
            input.end_frame();
        }

        let moved = (game.player().position - start).length();
        assert_relative_eq!(moved, player::MOVE_SPEED * DT * 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut game = Game::new(1.0);
        let mut input = InputState::new();

        input.press(Action::Jump);
        game.update(&input, DT);
        input.end_frame();
        assert!(!game.player().physics.is_grounded());

        // Hold Space until landing; the held key must not relaunch
        let mut frames = 0;
        while !game.player().physics.is_grounded() && frames < 1000 {
            game.update(&input, DT);
            input.end_frame();
            frames += 1;
        }
        assert!(game.player().physics.is_grounded());

        game.update(&input, DT);
        assert!(game.player().physics.is_grounded());
    }

    #[test]
    fn test_walk_then_idle_keeps_facing() {
        let mut game = Game::new(1.0);
        let mut input = InputState::new();
        input.press(Action::MoveForward);
        game.update(&input, DT);
        input.end_frame();
        input.release(Action::MoveForward);

        // Forward heading: away from the camera, idle row 0
        for _ in 0..5 {
            game.update(&input, DT);
            input.end_frame();
            assert_eq!(game.player_billboard().frame, (0, 0));
        }
    }

    #[test]
    fn test_billboard_mirrors_after_left_strafe() {
        let mut game = Game::new(1.0);
        let mut input = InputState::new();

        input.press(Action::StrafeLeft);
        game.update(&input, DT);
        assert!(game.player_billboard().mirrored);

        input.release(Action::StrafeLeft);
        input.press(Action::StrafeRight);
        game.update(&input, DT);
        assert!(!game.player_billboard().mirrored);
    }
}
