//! Woodchain engine - a small 2D layer over winit and wgpu.
//!
//! Provides the window and frame-capped event loop, per-frame input state,
//! a generic cell grid, and screen-space drawing of rectangles and text.

pub mod engine;
pub mod grid;
pub mod hud;
pub mod input;
pub mod render;

pub use crate::engine::{Engine, EngineConfig, EngineContext, Game};
pub use crate::grid::{CellCoord, Grid};
pub use crate::hud::{HudElement, HudLayer, HudOutline, HudRect, HudText};
pub use crate::input::{InputEvent, InputState};
pub use crate::render::{rgb8, DrawList, Frame, Renderer};
pub use glam::Vec2;
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
