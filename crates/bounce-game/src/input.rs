//! Input system with action-based mapping
//!
//! Provides an abstraction layer between the host's key events and game actions.
//! The host owns an [`InputHandler`] and publishes its [`InputState`] into the
//! world once per frame.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Host-independent key identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    Escape,
}

/// Game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Spawn animated sprites while held (Space by default)
    SpawnSprite,
    /// Leave the demo (Escape by default)
    Quit,
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

/// Maps keys to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<Key, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };
        bindings.bind(Key::Space, InputAction::SpawnSprite);
        bindings.bind(Key::Escape, InputAction::Quit);
        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: Key, action: InputAction) {
        self.bindings.insert(key, action);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: Key) {
        self.bindings.remove(&key);
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: Key) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }
}

/// Input handler that processes key events and updates state
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        let Some(action) = self.bindings.get_key_action(key) else {
            return;
        };
        if pressed {
            if !self.state.held.contains(&action) {
                self.state.just_pressed.insert(action);
            }
            self.state.held.insert(action);
        } else if self.state.held.remove(&action) {
            self.state.just_released.insert(action);
        }
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.state.clear_frame();
    }
}
