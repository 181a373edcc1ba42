// Movement direction -> discrete sprite facing

use glam::Vec2;

/// Movement below this magnitude does not change the stored heading.
pub const MOVE_EPSILON: f32 = 0.001;

/// Facing bucket boundaries in degrees of absolute heading angle.
///
/// The sheet enumerates one side of each diagonal pair (mirroring covers
/// left/right symmetry), so five buckets span front through back. A sheet
/// with more directions only needs a different boundary table.
pub const BUCKET_BOUNDS_DEG: [f32; 4] = [22.5, 67.5, 112.5, 157.5];

/// Sprite rows for the idle facings, indexed by bucket.
pub const IDLE_ROWS: [u32; 5] = [0, 1, 2, 3, 4];
/// Walk cycle row used for buckets 0..=2 when heading away from the camera.
pub const WALK_ROW_AWAY: u32 = 6;
/// Walk cycle row used for buckets 2..=4 when heading toward the camera.
pub const WALK_ROW_TOWARD: u32 = 5;

/// Maps the accumulated 2D movement intent onto a facing bucket and sprite
/// row, remembering the last heading so an idle character keeps facing the
/// way it was last walking.
#[derive(Debug, Clone)]
pub struct FacingResolver {
    /// Unit heading in camera-relative ground coordinates (forward = +y)
    last_move_dir: Vec2,
}

/// Result of resolving one frame of movement intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facing {
    /// Discrete facing bucket, 0 (away) .. 4 (toward camera)
    pub index: u32,
    /// Sprite sheet row to show
    pub active_row: u32,
}

impl Default for FacingResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FacingResolver {
    /// Start out facing the camera.
    pub fn new() -> Self {
        Self {
            last_move_dir: Vec2::new(0.0, -1.0),
        }
    }

    /// Resolve this frame's movement intent.
    ///
    /// A non-negligible `dir2` becomes the new stored heading; otherwise
    /// the previous heading is kept, which is what holds the idle facing
    /// steady after the keys are released.
    pub fn resolve(&mut self, dir2: Vec2, moving: bool) -> Facing {
        if dir2.length() > MOVE_EPSILON {
            self.last_move_dir = dir2.normalize();
        }

        let index = Self::bucket(self.last_move_dir);
        let active_row = if moving {
            self.walk_row(index)
        } else {
            IDLE_ROWS[index as usize]
        };

        Facing { index, active_row }
    }

    /// The stored unit heading.
    pub fn last_move_dir(&self) -> Vec2 {
        self.last_move_dir
    }

    /// Bucket a unit heading by its absolute angle from straight ahead.
    fn bucket(dir: Vec2) -> u32 {
        let angle_deg = dir.x.atan2(dir.y).to_degrees();
        let aa = angle_deg.abs();

        let mut index = BUCKET_BOUNDS_DEG.len() as u32;
        for (i, &bound) in BUCKET_BOUNDS_DEG.iter().enumerate() {
            if aa < bound {
                index = i as u32;
                break;
            }
        }
        index
    }

    /// Pick the walk cycle row for a bucket.
    ///
    /// Bucket 2 is a pure left/right heading, ambiguous between the toward
    /// and away cycles; the forward component of the heading breaks the tie.
    fn walk_row(&self, index: u32) -> u32 {
        match index {
            3 | 4 => WALK_ROW_TOWARD,
            2 => {
                if self.last_move_dir.y >= 0.0 {
                    WALK_ROW_AWAY
                } else {
                    WALK_ROW_TOWARD
                }
            }
            _ => WALK_ROW_AWAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cardinal_buckets() {
        let mut resolver = FacingResolver::new();
        assert_eq!(resolver.resolve(Vec2::new(0.0, 1.0), true).index, 0);
        assert_eq!(resolver.resolve(Vec2::new(1.0, 0.0), true).index, 2);
        assert_eq!(resolver.resolve(Vec2::new(-1.0, 0.0), true).index, 2);
        assert_eq!(resolver.resolve(Vec2::new(0.0, -1.0), true).index, 4);
    }

    #[test]
    fn test_diagonal_buckets() {
        let mut resolver = FacingResolver::new();
        assert_eq!(resolver.resolve(Vec2::new(1.0, 1.0), true).index, 1);
        assert_eq!(resolver.resolve(Vec2::new(-1.0, 1.0), true).index, 1);
        assert_eq!(resolver.resolve(Vec2::new(1.0, -1.0), true).index, 3);
        assert_eq!(resolver.resolve(Vec2::new(-1.0, -1.0), true).index, 3);
    }

    #[test]
    fn test_bucket_boundaries() {
        // Just inside and just past the first boundary
        let inside = 22.4_f32.to_radians();
        let past = 22.6_f32.to_radians();
        let mut resolver = FacingResolver::new();

        let dir = Vec2::new(inside.sin(), inside.cos());
        assert_eq!(resolver.resolve(dir, true).index, 0);

        let dir = Vec2::new(past.sin(), past.cos());
        assert_eq!(resolver.resolve(dir, true).index, 1);

        // Straight back sits in the final closed bucket
        let dir = Vec2::new(0.0, -1.0);
        assert_eq!(resolver.resolve(dir, true).index, 4);
    }

    #[test]
    fn test_idle_keeps_last_heading() {
        let mut resolver = FacingResolver::new();
        let moving = resolver.resolve(Vec2::new(0.0, 1.0), true);
        assert_eq!(moving.index, 0);

        // Released keys: heading and derived facing stay put across frames
        for _ in 0..5 {
            let idle = resolver.resolve(Vec2::ZERO, false);
            assert_eq!(idle.index, 0);
            assert_eq!(idle.active_row, 0);
            assert_relative_eq!(resolver.last_move_dir().y, 1.0);
        }
    }

    #[test]
    fn test_idle_rows_match_bucket() {
        let mut resolver = FacingResolver::new();
        resolver.resolve(Vec2::new(1.0, -1.0), true);
        let idle = resolver.resolve(Vec2::ZERO, false);
        assert_eq!(idle.index, 3);
        assert_eq!(idle.active_row, 3);
    }

    #[test]
    fn test_walk_rows() {
        let mut resolver = FacingResolver::new();

        // Away from the camera and its diagonal
        assert_eq!(resolver.resolve(Vec2::new(0.0, 1.0), true).active_row, WALK_ROW_AWAY);
        assert_eq!(resolver.resolve(Vec2::new(1.0, 1.0), true).active_row, WALK_ROW_AWAY);

        // Toward the camera and its diagonal
        assert_eq!(resolver.resolve(Vec2::new(0.0, -1.0), true).active_row, WALK_ROW_TOWARD);
        assert_eq!(resolver.resolve(Vec2::new(1.0, -1.0), true).active_row, WALK_ROW_TOWARD);
    }

    #[test]
    fn test_sideways_walk_uses_forward_component() {
        let mut resolver = FacingResolver::new();

        // Pure sideways right after walking forward: forward component of the
        // stored heading is >= 0, so the away cycle is kept
        resolver.resolve(Vec2::new(0.0, 1.0), true);
        let facing = resolver.resolve(Vec2::new(1.0, 0.0), true);
        assert_eq!(facing.index, 2);
        assert_eq!(facing.active_row, WALK_ROW_AWAY);

        // Slightly toward the camera while mostly sideways flips to the
        // toward cycle within the same bucket
        let facing = resolver.resolve(Vec2::new(1.0, -0.1), true);
        assert_eq!(facing.index, 2);
        assert_eq!(facing.active_row, WALK_ROW_TOWARD);
    }

    #[test]
    fn test_negligible_movement_ignored() {
        let mut resolver = FacingResolver::new();
        resolver.resolve(Vec2::new(0.0, 1.0), true);

        // Sub-epsilon jitter must not steal the heading
        let facing = resolver.resolve(Vec2::new(0.0005, 0.0), true);
        assert_eq!(facing.index, 0);
        assert_relative_eq!(resolver.last_move_dir().y, 1.0);
    }

    #[test]
    fn test_initial_facing_is_toward_camera() {
        let mut resolver = FacingResolver::new();
        let idle = resolver.resolve(Vec2::ZERO, false);
        assert_eq!(idle.index, 4);
        assert_eq!(idle.active_row, 4);
    }
}
