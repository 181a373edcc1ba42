// Vertical physics: gravity, jumping, floor collision

use glam::Vec3;

/// Gravity and floor collision for the player.
///
/// Only the y axis is physically driven; horizontal movement is applied
/// directly by the controller. Integration is a plain explicit Euler step,
/// deterministic for a given `dt`, and a large `dt` (e.g. after a stall) is
/// integrated as one consistent step rather than clamped.
#[derive(Debug, Clone)]
pub struct VerticalPhysics {
    /// Vertical velocity in units per second
    pub velocity_y: f32,
    /// World-space height of the floor plane
    pub floor_y: f32,
    /// Character height; the sprite quad is centered, so the bottom edge
    /// sits at `position.y - height / 2`
    pub height: f32,
    /// Gravitational acceleration (negative)
    pub gravity: f32,
    /// Upward velocity applied by a jump
    pub jump_force: f32,
    /// Whether the bottom edge rests on the floor
    grounded: bool,
}

impl VerticalPhysics {
    pub const DEFAULT_GRAVITY: f32 = -9.8;
    pub const DEFAULT_JUMP_FORCE: f32 = 5.0;

    /// Create physics state resting on the given floor.
    pub fn new(floor_y: f32, height: f32) -> Self {
        Self {
            velocity_y: 0.0,
            floor_y,
            height,
            gravity: Self::DEFAULT_GRAVITY,
            jump_force: Self::DEFAULT_JUMP_FORCE,
            grounded: true,
        }
    }

    /// Y coordinate the player's center has while resting on the floor.
    pub fn rest_y(&self) -> f32 {
        self.floor_y + self.height / 2.0
    }

    /// Integrate one step of gravity and resolve floor collision.
    ///
    /// After this returns, `position.y - height / 2 >= floor_y` always
    /// holds and `grounded` reflects whether the floor was hit.
    pub fn integrate(&mut self, position: &mut Vec3, dt: f32) {
        self.velocity_y += self.gravity * dt;
        position.y += self.velocity_y * dt;

        let bottom_y = position.y - self.height / 2.0;
        if bottom_y < self.floor_y {
            position.y = self.rest_y();
            self.velocity_y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }

    /// Start a jump. No-op while airborne, so impulses never stack.
    pub fn jump(&mut self) {
        if self.grounded {
            self.velocity_y = self.jump_force;
            self.grounded = false;
        }
    }

    /// Whether the player rests on the floor.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Move the floor and snap the player onto it at rest.
    pub fn set_floor(&mut self, floor_y: f32, position: &mut Vec3) {
        self.floor_y = floor_y;
        position.y = self.rest_y();
        self.velocity_y = 0.0;
        self.grounded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn resting() -> (VerticalPhysics, Vec3) {
        let physics = VerticalPhysics::new(0.0, 1.0);
        let position = Vec3::new(0.0, physics.rest_y(), 0.0);
        (physics, position)
    }

    #[test]
    fn test_rest_on_floor() {
        let (mut physics, mut position) = resting();
        physics.integrate(&mut position, 0.016);
        assert!(physics.is_grounded());
        assert_relative_eq!(position.y, 0.5);
        assert_eq!(physics.velocity_y, 0.0);
    }

    #[test]
    fn test_never_penetrates_floor() {
        let (mut physics, mut position) = resting();
        position.y = 3.0;
        physics.grounded = false;

        // A spread of step sizes, including a stall-sized one
        for &dt in &[0.0, 0.004, 0.016, 0.033, 0.25, 1.5] {
            physics.integrate(&mut position, dt);
            assert!(position.y >= physics.floor_y + physics.height / 2.0 - 1e-6);
        }
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let (mut physics, mut position) = resting();
        physics.jump();
        assert!(!physics.is_grounded());
        let airborne_velocity = physics.velocity_y;
        assert_relative_eq!(airborne_velocity, 5.0);

        // Airborne jump must not change velocity
        physics.jump();
        assert_relative_eq!(physics.velocity_y, airborne_velocity);

        // Nor stack after partial integration
        physics.integrate(&mut position, 0.016);
        let v = physics.velocity_y;
        physics.jump();
        assert_relative_eq!(physics.velocity_y, v);
    }

    #[test]
    fn test_jump_arc_returns_to_rest() {
        let (mut physics, mut position) = resting();
        physics.jump();

        let mut became_airborne = false;
        let mut frames = 0;
        while frames < 1000 {
            physics.integrate(&mut position, 0.016);
            frames += 1;
            if !physics.is_grounded() {
                became_airborne = true;
            } else {
                break;
            }
        }

        assert!(became_airborne);
        assert!(physics.is_grounded());
        assert_relative_eq!(position.y, 0.5);
        assert_eq!(physics.velocity_y, 0.0);
        // 5.0 m/s up against 9.8 m/s^2 lands in roughly a second
        assert!(frames > 30 && frames < 100);
    }

    #[test]
    fn test_large_dt_single_step() {
        let (mut physics, mut position) = resting();
        physics.jump();

        // One huge step: gravity overwhelms the jump and the player lands
        physics.integrate(&mut position, 2.0);
        assert!(physics.is_grounded());
        assert_relative_eq!(position.y, 0.5);
    }

    #[test]
    fn test_set_floor_snaps_to_rest() {
        let (mut physics, mut position) = resting();
        physics.jump();
        physics.set_floor(2.0, &mut position);
        assert!(physics.is_grounded());
        assert_relative_eq!(position.y, 2.5);
        assert_eq!(physics.velocity_y, 0.0);
    }
}
