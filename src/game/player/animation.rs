// Sprite-sheet animation timing

/// Layout of the character sprite sheet.
///
/// Rows 0..=4 are the idle facings (front through back), rows 5 and 6 the
/// two walk cycles; left-facing variants come from mirroring.
#[derive(Debug, Clone, Copy)]
pub struct SpriteSheet {
    /// Number of frame columns
    pub cols: u32,
    /// Number of animation rows
    pub rows: u32,
}

impl SpriteSheet {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Flat frame index into the sheet for builds that address frames
    /// linearly instead of by (row, column).
    pub fn frame_number(&self, row: u32, frame_index: u32) -> u32 {
        row * self.cols + frame_index
    }
}

/// Advances the walk cycle against a fixed per-frame duration.
///
/// Idle always shows frame 0 of the active row; while moving, the timer
/// accumulates `dt` and rolls over as many frames as fit, so one large
/// step after a stall still lands on the right frame.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    /// Frames in the walk cycle
    pub frame_count: u32,
    /// Seconds each frame is shown
    pub frame_duration: f32,
    frame_index: u32,
    frame_timer: f32,
    /// Horizontal mirror: +1 faces right, -1 faces left
    facing_direction: i8,
}

impl AnimationClock {
    /// Create a clock for a cycle of `frame_count` frames.
    ///
    /// `frame_count` must be nonzero; a zero-length cycle has no frames to
    /// show and would make the rollover modulus meaningless.
    pub fn new(frame_count: u32, frame_duration: f32) -> Self {
        debug_assert!(frame_count > 0);
        Self {
            frame_count,
            frame_duration,
            frame_index: 0,
            frame_timer: 0.0,
            facing_direction: 1,
        }
    }

    /// Advance the clock by `dt` seconds.
    ///
    /// `direction` is the latest horizontal mirror command: nonzero updates
    /// the facing, zero leaves it unchanged.
    pub fn advance(&mut self, dt: f32, moving: bool, direction: i8) {
        if direction != 0 {
            self.facing_direction = direction.signum();
        }

        if moving {
            self.frame_timer += dt;
            while self.frame_timer >= self.frame_duration {
                self.frame_index = (self.frame_index + 1) % self.frame_count;
                self.frame_timer -= self.frame_duration;
            }
        } else {
            self.frame_index = 0;
            self.frame_timer = 0.0;
        }
    }

    /// Restart the cycle from frame 0. Called when the active row changes
    /// so a stale frame from another row's layout is never shown.
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.frame_timer = 0.0;
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn frame_timer(&self) -> f32 {
        self.frame_timer
    }

    /// Current mirror flag: +1 right, -1 left.
    pub fn facing_direction(&self) -> i8 {
        self.facing_direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_idle_resets_to_frame_zero() {
        let mut clock = AnimationClock::new(4, 0.1);
        clock.advance(0.15, true, 0);
        assert_eq!(clock.frame_index(), 1);

        clock.advance(0.016, false, 0);
        assert_eq!(clock.frame_index(), 0);
        assert_eq!(clock.frame_timer(), 0.0);
    }

    #[test]
    fn test_quarter_second_rolls_two_frames() {
        let mut clock = AnimationClock::new(4, 0.1);
        clock.advance(0.25, true, 0);
        assert_eq!(clock.frame_index(), 2);
        assert_relative_eq!(clock.frame_timer(), 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_large_dt_rolls_many_frames() {
        let mut clock = AnimationClock::new(4, 0.1);
        // 1.05s = 10 full frames + 0.05 remainder, wrapping the 4-frame cycle
        clock.advance(1.05, true, 0);
        assert_eq!(clock.frame_index(), 10 % 4);
        assert_relative_eq!(clock.frame_timer(), 0.05, epsilon = 1e-4);
        assert!(clock.frame_timer() < clock.frame_duration);
    }

    #[test]
    fn test_timer_stays_below_duration() {
        let mut clock = AnimationClock::new(8, 0.1);
        for &dt in &[0.016, 0.3, 0.07, 2.4, 0.1] {
            clock.advance(dt, true, 0);
            assert!(clock.frame_index() < clock.frame_count);
            assert!(clock.frame_timer() >= 0.0);
            assert!(clock.frame_timer() < clock.frame_duration);
        }
    }

    #[test]
    fn test_facing_persists_without_command() {
        let mut clock = AnimationClock::new(4, 0.1);
        assert_eq!(clock.facing_direction(), 1);

        clock.advance(0.016, true, -1);
        assert_eq!(clock.facing_direction(), -1);

        // Zero direction leaves the mirror untouched, moving or not
        clock.advance(0.016, true, 0);
        assert_eq!(clock.facing_direction(), -1);
        clock.advance(0.016, false, 0);
        assert_eq!(clock.facing_direction(), -1);

        clock.advance(0.016, false, 1);
        assert_eq!(clock.facing_direction(), 1);
    }

    #[test]
    fn test_sprite_sheet_frame_number() {
        let sheet = SpriteSheet::new(8, 8);
        assert_eq!(sheet.frame_number(0, 0), 0);
        assert_eq!(sheet.frame_number(0, 3), 3);
        assert_eq!(sheet.frame_number(6, 2), 50);
    }
}
