use woodchain_engine::{EngineConfig, Grid};

use crate::buildings::BuildingTable;
use crate::resources::Resources;
use crate::simulation::Simulation;

/// Screen-space layout of the text readouts.
#[derive(Clone, Debug, PartialEq)]
pub struct HudLayout {
    pub origin: [f32; 2],
    pub line_spacing: f32,
    pub font_size: f32,
}

/// Colors used by the view, sRGB.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: [u8; 3],
    pub grid_line: [u8; 3],
    pub text: [u8; 3],
}

/// Every tunable of a game session. All values live in code.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub title: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub cell_size: u32,
    pub grid_line_width: f32,
    pub target_fps: u32,
    pub palette: Palette,
    pub hud: HudLayout,
    pub buildings: BuildingTable,
    pub starting_resources: Resources,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Production Chain Game".into(),
            screen_width: 800,
            screen_height: 600,
            cell_size: 40,
            grid_line_width: 1.0,
            target_fps: 30,
            palette: Palette {
                background: [200, 200, 200],
                grid_line: [150, 150, 150],
                text: [0, 0, 0],
            },
            hud: HudLayout {
                origin: [10.0, 10.0],
                line_spacing: 30.0,
                font_size: 24.0,
            },
            buildings: BuildingTable::extended(),
            starting_resources: Resources::new(),
        }
    }
}

impl GameConfig {
    /// The same game without farms or food.
    pub fn base() -> Self {
        Self {
            buildings: BuildingTable::base(),
            ..Self::default()
        }
    }

    pub fn rows(&self) -> u32 {
        self.screen_height / self.cell_size.max(1)
    }

    pub fn cols(&self) -> u32 {
        self.screen_width / self.cell_size.max(1)
    }

    /// Window settings for the engine. The window keeps its size.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            title: self.title.clone(),
            width: self.screen_width,
            height: self.screen_height,
            target_fps: self.target_fps,
            resizable: false,
            ..EngineConfig::default()
        }
    }

    /// Fresh simulation: empty grid, starting stockpile, nothing selected.
    pub fn simulation(&self) -> Simulation {
        let grid = Grid::covering(self.screen_width, self.screen_height, self.cell_size, None);
        Simulation::new(self.buildings.clone(), grid).with_resources(self.starting_resources.clone())
    }
}
