//! Turns simulation state into HUD elements. Reads state, never changes it.

use woodchain_engine::{rgb8, HudLayer, HudOutline, HudRect, HudText, Vec2};

use crate::buildings::BuildingTable;
use crate::config::GameConfig;
use crate::simulation::Simulation;

/// "Press W for Woodcutter, S for Sawmill, ..., then Click to Place"
pub fn instructions(table: &BuildingTable) -> String {
    let bindings: Vec<String> = table
        .iter()
        .map(|spec| format!("{} for {}", spec.hotkey, spec.kind))
        .collect();
    format!("Press {}, then Click to Place", bindings.join(", "))
}

/// Readout lines, top to bottom.
pub fn hud_lines(sim: &Simulation) -> Vec<String> {
    let mut lines: Vec<String> = sim
        .table()
        .resources_in_use()
        .into_iter()
        .map(|kind| format!("{kind}: {}", sim.resources().get(kind)))
        .collect();
    lines.push(instructions(sim.table()));
    lines.push(match sim.selection() {
        Some(kind) => format!("Selected: {}", kind.id()),
        None => "Selected: None".to_string(),
    });
    lines
}

/// Rebuild `hud` with the grid, the buildings on it and the text readouts.
pub fn build_hud(sim: &Simulation, config: &GameConfig, hud: &mut HudLayer) {
    hud.clear();

    let grid = sim.grid();
    let cell = Vec2::splat(grid.cell_size());
    let line_color = rgb8(config.palette.grid_line);
    for (coord, building) in grid.iter() {
        let origin = grid.cell_origin(coord);
        hud.add_outline(HudOutline {
            position: origin,
            size: cell,
            thickness: config.grid_line_width,
            color: line_color,
        });
        if let Some(spec) = building.and_then(|kind| sim.table().get(kind)) {
            hud.add_rect(HudRect {
                position: origin,
                size: cell,
                color: rgb8(spec.color),
            });
        }
    }

    let [x, y] = config.hud.origin;
    for (i, line) in hud_lines(sim).into_iter().enumerate() {
        hud.add_text(HudText {
            text: line,
            size: config.hud.font_size,
            position: Vec2::new(x, y + i as f32 * config.hud.line_spacing),
            color: rgb8(config.palette.text),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::buildings::BuildingKind;
    use crate::resources::{ResourceKind, Resources};
    use woodchain_engine::{CellCoord, HudElement};

    #[test]
    fn fresh_game_readouts() {
        let sim = GameConfig::default().simulation();
        assert_eq!(
            hud_lines(&sim),
            vec![
                "Wood: 0",
                "Planks: 0",
                "Food: 0",
                "Press W for Woodcutter, S for Sawmill, F for Farm, H for House, then Click to Place",
                "Selected: None",
            ]
        );
    }

    #[test]
    fn base_game_has_no_food_line() {
        let mut sim = GameConfig::base().simulation();
        sim.select(BuildingKind::House);
        assert_eq!(
            hud_lines(&sim),
            vec![
                "Wood: 0",
                "Planks: 0",
                "Press W for Woodcutter, S for Sawmill, H for House, then Click to Place",
                "Selected: house",
            ]
        );
    }

    #[test]
    fn selection_is_shown_in_lowercase() {
        let mut sim = GameConfig::default().simulation();
        sim.select(BuildingKind::Woodcutter);
        assert_eq!(hud_lines(&sim).last().map(String::as_str), Some("Selected: woodcutter"));
        sim.select(BuildingKind::Sawmill);
        assert_eq!(hud_lines(&sim).last().map(String::as_str), Some("Selected: sawmill"));
    }

    #[test]
    fn text_stacks_down_from_the_origin() {
        let config = GameConfig::default();
        let sim = config.simulation();
        let mut hud = HudLayer::new();
        build_hud(&sim, &config, &mut hud);

        let positions: Vec<Vec2> = hud.texts().map(|t| t.position).collect();
        assert_eq!(positions.len(), 5);
        assert_eq!(positions[0], Vec2::new(10.0, 10.0));
        assert_eq!(positions[4], Vec2::new(10.0, 130.0));
        assert!(hud.texts().all(|t| t.size == 24.0 && t.color == [0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn every_cell_is_outlined_and_buildings_are_filled() {
        let config = GameConfig {
            starting_resources: Resources::new().with(ResourceKind::Planks, 5),
            ..GameConfig::default()
        };
        let mut sim = config.simulation();
        sim.select(BuildingKind::House);
        sim.place_selected(CellCoord::new(1, 2), Duration::ZERO)
            .expect("affordable");

        let mut hud = HudLayer::new();
        build_hud(&sim, &config, &mut hud);

        let outlines = hud
            .elements()
            .iter()
            .filter(|e| matches!(e, HudElement::Outline(_)))
            .count();
        assert_eq!(outlines, 15 * 20);

        let fills: Vec<&HudRect> = hud
            .elements()
            .iter()
            .filter_map(|e| match e {
                HudElement::Rect(rect) => Some(rect),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].position, Vec2::new(80.0, 40.0));
        assert_eq!(fills[0].color, rgb8([100, 149, 237]));
    }

    #[test]
    fn building_the_hud_leaves_the_simulation_alone() {
        let config = GameConfig::default();
        let mut sim = config.simulation();
        sim.select(BuildingKind::Woodcutter);
        sim.place_selected(CellCoord::new(0, 0), Duration::ZERO)
            .expect("free");
        let before = sim.clone();

        let mut hud = HudLayer::new();
        build_hud(&sim, &config, &mut hud);
        build_hud(&sim, &config, &mut hud);
        assert_eq!(sim.resources(), before.resources());
        assert_eq!(sim.producers(), before.producers());
        assert_eq!(sim.selection(), before.selection());
    }
}
