// Game action definitions and key bindings

use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (camera-relative)
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    Jump,

    // Meta actions
    Quit,
}

/// Default keyboard bindings (WASD + Space, Escape to quit)
pub fn default_bindings() -> HashMap<KeyCode, Action> {
    HashMap::from([
        (KeyCode::KeyW, Action::MoveForward),
        (KeyCode::KeyS, Action::MoveBack),
        (KeyCode::KeyA, Action::StrafeLeft),
        (KeyCode::KeyD, Action::StrafeRight),
        (KeyCode::Space, Action::Jump),
        (KeyCode::Escape, Action::Quit),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Jump, Action::Jump);
        assert_ne!(Action::Jump, Action::MoveForward);
    }

    #[test]
    fn test_default_bindings_cover_movement() {
        let bindings = default_bindings();
        assert_eq!(bindings.get(&KeyCode::KeyW), Some(&Action::MoveForward));
        assert_eq!(bindings.get(&KeyCode::KeyS), Some(&Action::MoveBack));
        assert_eq!(bindings.get(&KeyCode::KeyA), Some(&Action::StrafeLeft));
        assert_eq!(bindings.get(&KeyCode::KeyD), Some(&Action::StrafeRight));
        assert_eq!(bindings.get(&KeyCode::Space), Some(&Action::Jump));
        assert_eq!(bindings.get(&KeyCode::Escape), Some(&Action::Quit));
    }
}
