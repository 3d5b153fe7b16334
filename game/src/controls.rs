//! Translates a frame's input events into simulation commands.

use std::time::Duration;

use log::debug;
use woodchain_engine::{InputEvent, KeyCode, MouseButton, Vec2};

use crate::simulation::Simulation;

/// Letter printed on a key, for the A-Z keys.
pub fn hotkey_for(key: KeyCode) -> Option<char> {
    let letter = match key {
        KeyCode::KeyA => 'A',
        KeyCode::KeyB => 'B',
        KeyCode::KeyC => 'C',
        KeyCode::KeyD => 'D',
        KeyCode::KeyE => 'E',
        KeyCode::KeyF => 'F',
        KeyCode::KeyG => 'G',
        KeyCode::KeyH => 'H',
        KeyCode::KeyI => 'I',
        KeyCode::KeyJ => 'J',
        KeyCode::KeyK => 'K',
        KeyCode::KeyL => 'L',
        KeyCode::KeyM => 'M',
        KeyCode::KeyN => 'N',
        KeyCode::KeyO => 'O',
        KeyCode::KeyP => 'P',
        KeyCode::KeyQ => 'Q',
        KeyCode::KeyR => 'R',
        KeyCode::KeyS => 'S',
        KeyCode::KeyT => 'T',
        KeyCode::KeyU => 'U',
        KeyCode::KeyV => 'V',
        KeyCode::KeyW => 'W',
        KeyCode::KeyX => 'X',
        KeyCode::KeyY => 'Y',
        KeyCode::KeyZ => 'Z',
        _ => return None,
    };
    Some(letter)
}

/// Apply events in arrival order. Keys select, left clicks place.
///
/// Rejected placements are dropped; the player sees nothing happen.
pub fn apply_input(sim: &mut Simulation, events: &[InputEvent], now: Duration) {
    for event in events {
        match *event {
            InputEvent::KeyPressed(key) => {
                if let Some(kind) = hotkey_for(key).and_then(|letter| sim.select_hotkey(letter)) {
                    debug!("selected {kind}");
                }
            }
            InputEvent::MousePressed {
                button: MouseButton::Left,
                x,
                y,
            } => {
                if let Err(err) = sim.click(Vec2::new(x, y), now) {
                    debug!("placement rejected: {err}");
                }
            }
            InputEvent::MousePressed { .. } => {}
        }
    }
}
