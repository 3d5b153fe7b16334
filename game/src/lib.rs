//! Woodchain: place woodcutters, sawmills, farms and houses on a grid and
//! watch wood turn into planks.
//!
//! The simulation ([`Simulation`]) is plain data driven by an explicit
//! clock, so it runs the same under the window loop and in tests.

pub mod buildings;
pub mod clock;
pub mod config;
pub mod controls;
pub mod game;
pub mod production;
pub mod resources;
pub mod simulation;
pub mod view;

pub use crate::buildings::{BuildingKind, BuildingSpec, BuildingTable, Production};
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::GameConfig;
pub use crate::game::ProductionChainGame;
pub use crate::production::{ProductionOutcome, Producer, TimerState};
pub use crate::resources::{Amount, ResourceKind, Resources, Shortfall};
pub use crate::simulation::{PlacementError, Simulation, TickReport};
