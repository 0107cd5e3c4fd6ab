//! Keyboard input for the arena window.
//!
//! `Input` records which keys went down since the last frame, ignoring
//! auto-repeat while a key stays held, and turns them into [`Command`]s for
//! the host loop.

use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Keys the arena cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    Escape,
    P,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::KeyP => KeyCode::P,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Actions requested by the user this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Grow the particles by one size step.
    GrowParticles,
    TogglePause,
    Quit,
}

/// Key state tracking.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key was pressed this frame (just went down).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Commands for the keys pressed since the last [`begin_frame`](Self::begin_frame).
    pub fn commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.key_pressed(KeyCode::Space) {
            commands.push(Command::GrowParticles);
        }
        if self.key_pressed(KeyCode::P) {
            commands.push(Command::TogglePause);
        }
        if self.key_pressed(KeyCode::Escape) {
            commands.push(Command::Quit);
        }
        commands
    }

    /// Called at the start of each frame to clear per-frame state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Record a key transition.
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // Only fire pressed event if not already held (no repeat)
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if let PhysicalKey::Code(keycode) = event.physical_key {
                self.handle_key(KeyCode::from(keycode), event.state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_clears_each_frame() {
        let mut input = Input::new();
        assert!(!input.key_pressed(KeyCode::Space));

        input.handle_key(KeyCode::Space, ElementState::Pressed);
        assert!(input.key_pressed(KeyCode::Space));

        input.begin_frame();
        assert!(!input.key_pressed(KeyCode::Space));
        assert!(input.commands().is_empty());
    }

    #[test]
    fn test_release_allows_next_press() {
        let mut input = Input::new();
        input.handle_key(KeyCode::P, ElementState::Pressed);
        input.begin_frame();
        input.handle_key(KeyCode::P, ElementState::Released);
        input.handle_key(KeyCode::P, ElementState::Pressed);
        assert_eq!(input.commands(), vec![Command::TogglePause]);
    }

    #[test]
    fn test_held_key_does_not_repeat() {
        let mut input = Input::new();
        input.handle_key(KeyCode::Space, ElementState::Pressed);
        input.begin_frame();
        input.handle_key(KeyCode::Space, ElementState::Pressed);
        assert!(input.commands().is_empty());
    }

    #[test]
    fn test_commands_from_presses() {
        let mut input = Input::new();
        input.handle_key(KeyCode::Space, ElementState::Pressed);
        input.handle_key(KeyCode::Escape, ElementState::Pressed);
        input.handle_key(KeyCode::Other(7), ElementState::Pressed);
        assert_eq!(input.commands(), vec![Command::GrowParticles, Command::Quit]);
    }

    #[test]
    fn test_winit_key_mapping() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyP), KeyCode::P);
        assert!(matches!(KeyCode::from(WinitKeyCode::KeyQ), KeyCode::Other(_)));
    }
}
