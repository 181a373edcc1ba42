// Keyboard input state from winit events

use std::collections::{HashMap, HashSet};

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::action::{default_bindings, Action};

/// Tracks held and edge-triggered action state across frames.
///
/// Events are fed in as winit delivers them; `end_frame` rolls the edge
/// sets over once per loop iteration after the game has consumed them.
#[derive(Debug)]
pub struct InputState {
    /// Key -> action bindings
    bindings: HashMap<KeyCode, Action>,

    /// Actions that are currently held
    pressed: HashSet<Action>,

    /// Actions that went down since the last `end_frame`
    just_pressed: HashSet<Action>,

    /// Actions that went up since the last `end_frame`
    just_released: HashSet<Action>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Create input state with the default bindings
    pub fn new() -> Self {
        Self {
            bindings: default_bindings(),
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        let Some(&action) = self.bindings.get(&key_code) else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                // OS key repeats are not fresh presses
                if !event.repeat && self.pressed.insert(action) {
                    self.just_pressed.insert(action);
                }
            }
            ElementState::Released => {
                if self.pressed.remove(&action) {
                    self.just_released.insert(action);
                }
            }
        }
    }

    /// Press an action directly. Used by tests and for synthetic input.
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Release an action directly.
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Roll over edge state. Call once per frame after the game update.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action went down this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action went up this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Clear all input state (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
