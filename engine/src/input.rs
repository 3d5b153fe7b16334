use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent, MouseButton},
    keyboard::{KeyCode, PhysicalKey},
};

/// A discrete press recorded during the current frame, in arrival order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyPressed(KeyCode),
    /// Mouse press at the cursor position, in logical pixels.
    MousePressed { button: MouseButton, x: f32, y: f32 },
}

/// Turns raw window input into a queue of press events per frame.
///
/// Held keys and buttons are tracked only so that a press is reported once
/// until the matching release arrives.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,

    mouse_x: f32,
    mouse_y: f32,
    mouse_down: [bool; 8],

    events: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the events handled by the last frame. Held state carries over.
    pub fn begin_frame(&mut self) {
        self.events.clear();
    }

    /// Handle a keyboard input event from winit.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(keycode) = event.physical_key else {
            return;
        };
        match event.state {
            ElementState::Pressed if event.repeat => {}
            ElementState::Pressed => self.press_key(keycode),
            ElementState::Released => self.release_key(keycode),
        }
    }

    /// Record a key going down.
    pub fn press_key(&mut self, keycode: KeyCode) {
        if self.keys_down.insert(keycode) {
            self.events.push(InputEvent::KeyPressed(keycode));
        }
    }

    /// Record a key going up.
    pub fn release_key(&mut self, keycode: KeyCode) {
        self.keys_down.remove(&keycode);
    }

    /// Handle a mouse button input event from winit.
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(idx) = mouse_button_index(button) else {
            return;
        };
        match state {
            ElementState::Pressed => {
                if !self.mouse_down[idx] {
                    self.events.push(InputEvent::MousePressed {
                        button,
                        x: self.mouse_x,
                        y: self.mouse_y,
                    });
                }
                self.mouse_down[idx] = true;
            }
            ElementState::Released => self.mouse_down[idx] = false,
        }
    }

    /// Handle mouse cursor movement, in logical pixels.
    pub fn handle_cursor_moved(&mut self, x: f64, y: f64) {
        self.mouse_x = x as f32;
        self.mouse_y = y as f32;
    }

    /// Presses seen since the last frame, oldest first.
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }
}

fn mouse_button_index(button: MouseButton) -> Option<usize> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        MouseButton::Back => Some(3),
        MouseButton::Forward => Some(4),
        MouseButton::Other(raw) => {
            let mapped = 5 + raw as usize; // 0-4 are the standard buttons
            (mapped < 8).then_some(mapped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_press_is_recorded_once_until_released() {
        let mut input = InputState::new();
        input.press_key(KeyCode::KeyW);
        input.press_key(KeyCode::KeyW);
        assert_eq!(input.events(), &[InputEvent::KeyPressed(KeyCode::KeyW)]);

        input.release_key(KeyCode::KeyW);
        input.press_key(KeyCode::KeyW);
        assert_eq!(input.events().len(), 2);
    }

    #[test]
    fn begin_frame_clears_events_but_remembers_held_input() {
        let mut input = InputState::new();
        input.press_key(KeyCode::KeyS);
        input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.begin_frame();
        assert!(input.events().is_empty());

        // Still held from the previous frame, so no new press.
        input.press_key(KeyCode::KeyS);
        input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(input.events().is_empty());
    }

    #[test]
    fn mouse_press_captures_cursor_position() {
        let mut input = InputState::new();
        input.handle_cursor_moved(85.0, 41.5);
        input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.handle_cursor_moved(300.0, 300.0);

        assert_eq!(
            input.events(),
            &[InputEvent::MousePressed {
                button: MouseButton::Left,
                x: 85.0,
                y: 41.5,
            }]
        );
    }

    #[test]
    fn events_keep_arrival_order() {
        let mut input = InputState::new();
        input.press_key(KeyCode::KeyH);
        input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.handle_mouse_button(MouseButton::Left, ElementState::Released);
        input.press_key(KeyCode::KeyW);
        input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);

        let kinds: Vec<bool> = input
            .events()
            .iter()
            .map(|event| matches!(event, InputEvent::KeyPressed(_)))
            .collect();
        assert_eq!(kinds, vec![true, false, true, false]);
    }

    #[test]
    fn exotic_mouse_buttons_past_the_table_are_ignored() {
        let mut input = InputState::new();
        input.handle_mouse_button(MouseButton::Other(9), ElementState::Pressed);
        assert!(input.events().is_empty());
    }
}
