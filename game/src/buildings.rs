//! Building kinds and the table that defines what each one costs, makes and eats.
//!
//! Every rule the simulation applies to a building comes from its
//! [`BuildingSpec`]; adding a building means adding an enum variant and a row.

use std::fmt;
use std::time::Duration;

use crate::resources::{Amount, ResourceKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildingKind {
    Woodcutter,
    Sawmill,
    Farm,
    House,
}

impl BuildingKind {
    pub fn label(self) -> &'static str {
        match self {
            BuildingKind::Woodcutter => "Woodcutter",
            BuildingKind::Sawmill => "Sawmill",
            BuildingKind::Farm => "Farm",
            BuildingKind::House => "House",
        }
    }

    /// Lowercase name shown as the current selection.
    pub fn id(self) -> &'static str {
        match self {
            BuildingKind::Woodcutter => "woodcutter",
            BuildingKind::Sawmill => "sawmill",
            BuildingKind::Farm => "farm",
            BuildingKind::House => "house",
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Timed conversion: every `interval`, spend `inputs` (if available) to make `outputs`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Production {
    pub interval: Duration,
    pub inputs: Vec<Amount>,
    pub outputs: Vec<Amount>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildingSpec {
    pub kind: BuildingKind,
    /// Letter key that selects this building, uppercase.
    pub hotkey: char,
    /// Paid once, at placement.
    pub cost: Vec<Amount>,
    /// Present for buildings that run a production timer.
    pub production: Option<Production>,
    /// Charged every frame for as long as the building stands, when affordable.
    pub upkeep: Vec<Amount>,
    /// Fill color on the grid, sRGB.
    pub color: [u8; 3],
}

impl BuildingSpec {
    pub fn is_producer(&self) -> bool {
        self.production.is_some()
    }
}

/// The set of buildings available in a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildingTable {
    specs: Vec<BuildingSpec>,
}

impl Default for BuildingTable {
    fn default() -> Self {
        Self::extended()
    }
}

impl BuildingTable {
    pub fn new(specs: Vec<BuildingSpec>) -> Self {
        Self { specs }
    }

    /// Woodcutter, Sawmill, Farm and House, with houses eating food.
    ///
    /// Farms only claim their cell; nothing in this table grows food.
    pub fn extended() -> Self {
        Self::new(vec![
            woodcutter(),
            sawmill(),
            farm(None),
            house(vec![Amount::new(ResourceKind::Food, 1)]),
        ])
    }

    /// [`BuildingTable::extended`] with farms harvesting 1 Food every 5 s.
    pub fn harvesting() -> Self {
        Self::new(vec![
            woodcutter(),
            sawmill(),
            farm(Some(Production {
                interval: Duration::from_secs(5),
                inputs: vec![],
                outputs: vec![Amount::new(ResourceKind::Food, 1)],
            })),
            house(vec![Amount::new(ResourceKind::Food, 1)]),
        ])
    }

    /// Woodcutter, Sawmill and House only; nothing uses food.
    pub fn base() -> Self {
        Self::new(vec![woodcutter(), sawmill(), house(vec![])])
    }

    pub fn get(&self, kind: BuildingKind) -> Option<&BuildingSpec> {
        self.specs.iter().find(|spec| spec.kind == kind)
    }

    /// Building bound to a letter key, case-insensitive.
    pub fn by_hotkey(&self, key: char) -> Option<BuildingKind> {
        let key = key.to_ascii_uppercase();
        self.specs
            .iter()
            .find(|spec| spec.hotkey == key)
            .map(|spec| spec.kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildingSpec> {
        self.specs.iter()
    }

    /// Resources mentioned anywhere in the table, in display order.
    pub fn resources_in_use(&self) -> Vec<ResourceKind> {
        let mentioned = |kind: ResourceKind| {
            self.specs.iter().any(|spec| {
                let production = spec
                    .production
                    .iter()
                    .flat_map(|p| p.inputs.iter().chain(p.outputs.iter()));
                spec.cost
                    .iter()
                    .chain(spec.upkeep.iter())
                    .chain(production)
                    .any(|amount| amount.kind == kind)
            })
        };
        ResourceKind::ALL.into_iter().filter(|&kind| mentioned(kind)).collect()
    }
}

fn woodcutter() -> BuildingSpec {
    BuildingSpec {
        kind: BuildingKind::Woodcutter,
        hotkey: 'W',
        cost: vec![],
        production: Some(Production {
            interval: Duration::from_secs(3),
            inputs: vec![],
            outputs: vec![Amount::new(ResourceKind::Wood, 1)],
        }),
        upkeep: vec![],
        color: [139, 69, 19],
    }
}

fn sawmill() -> BuildingSpec {
    BuildingSpec {
        kind: BuildingKind::Sawmill,
        hotkey: 'S',
        cost: vec![],
        production: Some(Production {
            interval: Duration::from_secs(5),
            inputs: vec![Amount::new(ResourceKind::Wood, 1)],
            outputs: vec![Amount::new(ResourceKind::Planks, 1)],
        }),
        upkeep: vec![],
        color: [205, 133, 63],
    }
}

fn farm(production: Option<Production>) -> BuildingSpec {
    BuildingSpec {
        kind: BuildingKind::Farm,
        hotkey: 'F',
        cost: vec![Amount::new(ResourceKind::Planks, 3)],
        production,
        upkeep: vec![],
        color: [34, 139, 34],
    }
}

fn house(upkeep: Vec<Amount>) -> BuildingSpec {
    BuildingSpec {
        kind: BuildingKind::House,
        hotkey: 'H',
        cost: vec![Amount::new(ResourceKind::Planks, 5)],
        production: None,
        upkeep,
        color: [100, 149, 237],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_extended() {
        assert_eq!(BuildingTable::default(), BuildingTable::extended());
    }

    #[test]
    fn hotkeys_are_case_insensitive() {
        let table = BuildingTable::extended();
        assert_eq!(table.by_hotkey('w'), Some(BuildingKind::Woodcutter));
        assert_eq!(table.by_hotkey('S'), Some(BuildingKind::Sawmill));
        assert_eq!(table.by_hotkey('f'), Some(BuildingKind::Farm));
        assert_eq!(table.by_hotkey('H'), Some(BuildingKind::House));
        assert_eq!(table.by_hotkey('Q'), None);
    }

    #[test]
    fn base_table_has_no_farm_and_no_food() {
        let table = BuildingTable::base();
        assert!(table.get(BuildingKind::Farm).is_none());
        assert_eq!(table.by_hotkey('F'), None);
        assert_eq!(
            table.resources_in_use(),
            vec![ResourceKind::Wood, ResourceKind::Planks]
        );
    }

    #[test]
    fn extended_table_tracks_food() {
        assert_eq!(
            BuildingTable::extended().resources_in_use(),
            vec![ResourceKind::Wood, ResourceKind::Planks, ResourceKind::Food]
        );
    }

    #[test]
    fn houses_are_placement_only() {
        let table = BuildingTable::extended();
        let house = table.get(BuildingKind::House).expect("house row");
        assert!(!house.is_producer());
        assert_eq!(house.cost, vec![Amount::new(ResourceKind::Planks, 5)]);
        assert_eq!(house.upkeep, vec![Amount::new(ResourceKind::Food, 1)]);
    }

    #[test]
    fn production_intervals() {
        let table = BuildingTable::extended();
        let interval = |kind| {
            table
                .get(kind)
                .and_then(|spec| spec.production.as_ref())
                .map(|p| p.interval)
        };
        assert_eq!(interval(BuildingKind::Woodcutter), Some(Duration::from_secs(3)));
        assert_eq!(interval(BuildingKind::Sawmill), Some(Duration::from_secs(5)));
        assert_eq!(interval(BuildingKind::Farm), None);
        assert_eq!(interval(BuildingKind::House), None);
    }

    #[test]
    fn farms_cost_three_planks_and_only_harvest_when_opted_in() {
        let default_farm = BuildingTable::extended()
            .get(BuildingKind::Farm)
            .cloned()
            .expect("farm row");
        assert_eq!(default_farm.cost, vec![Amount::new(ResourceKind::Planks, 3)]);
        assert!(!default_farm.is_producer());

        let harvesting = BuildingTable::harvesting();
        let farm = harvesting.get(BuildingKind::Farm).expect("farm row");
        assert_eq!(farm.cost, default_farm.cost);
        assert_eq!(
            farm.production.as_ref().map(|p| p.interval),
            Some(Duration::from_secs(5))
        );
    }
}
