//! Game state and the rules that change it.
//!
//! A [`Simulation`] owns the grid, the resource store, the producers and the
//! current selection. Callers pass in the current time so that a frame of
//! simulation is fully determined by its inputs.

use std::time::Duration;

use log::{debug, info};
use thiserror::Error;
use woodchain_engine::{CellCoord, Grid, Vec2};

use crate::buildings::{BuildingKind, BuildingTable};
use crate::production::{ProductionOutcome, Producer};
use crate::resources::{Resources, Shortfall};

/// Why a placement did nothing. The grid and resources are unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell {0} is outside the grid")]
    OutOfBounds(CellCoord),
    #[error("cell {0} is already occupied")]
    Occupied(CellCoord),
    #[error("no building selected")]
    NothingSelected,
    #[error("{0} is not available in this game")]
    UnknownBuilding(BuildingKind),
    #[error(transparent)]
    Unaffordable(#[from] Shortfall),
}

/// Counts from one frame of simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub produced: usize,
    pub starved: usize,
    pub upkeep_paid: usize,
    pub upkeep_missed: usize,
}

#[derive(Clone, Debug)]
pub struct Simulation {
    table: BuildingTable,
    grid: Grid<Option<BuildingKind>>,
    resources: Resources,
    producers: Vec<Producer>,
    selection: Option<BuildingKind>,
}

impl Simulation {
    pub fn new(table: BuildingTable, grid: Grid<Option<BuildingKind>>) -> Self {
        Self {
            table,
            grid,
            resources: Resources::new(),
            producers: Vec::new(),
            selection: None,
        }
    }

    /// Replace the starting stockpile.
    #[must_use]
    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    pub fn table(&self) -> &BuildingTable {
        &self.table
    }

    pub fn grid(&self) -> &Grid<Option<BuildingKind>> {
        &self.grid
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    pub fn producers(&self) -> &[Producer] {
        &self.producers
    }

    pub fn selection(&self) -> Option<BuildingKind> {
        self.selection
    }

    pub fn building_at(&self, coord: CellCoord) -> Option<BuildingKind> {
        self.grid.get(coord).copied().flatten()
    }

    /// Select a building for the next placement. Kinds missing from the table are ignored.
    pub fn select(&mut self, kind: BuildingKind) -> bool {
        if self.table.get(kind).is_none() {
            return false;
        }
        self.selection = Some(kind);
        true
    }

    /// Select whatever building the key is bound to, if any.
    pub fn select_hotkey(&mut self, key: char) -> Option<BuildingKind> {
        let kind = self.table.by_hotkey(key)?;
        self.selection = Some(kind);
        Some(kind)
    }

    /// Place the selected building in the cell under a pixel position.
    pub fn click(&mut self, position: Vec2, now: Duration) -> Result<BuildingKind, PlacementError> {
        let coord = self.grid.cell_at(position);
        self.place_selected(coord, now)
    }

    /// Place the selected building. The selection stays set afterwards.
    pub fn place_selected(&mut self, coord: CellCoord, now: Duration) -> Result<BuildingKind, PlacementError> {
        if !self.grid.contains(coord) {
            return Err(PlacementError::OutOfBounds(coord));
        }
        let kind = self.selection.ok_or(PlacementError::NothingSelected)?;
        self.place_building(coord, kind, now)?;
        Ok(kind)
    }

    /// Claim an empty cell for `kind`, pay its cost, and start its timer if it produces.
    pub fn place_building(
        &mut self,
        coord: CellCoord,
        kind: BuildingKind,
        now: Duration,
    ) -> Result<(), PlacementError> {
        let spec = self
            .table
            .get(kind)
            .ok_or(PlacementError::UnknownBuilding(kind))?;
        match self.grid.get(coord) {
            None => return Err(PlacementError::OutOfBounds(coord)),
            Some(Some(_)) => return Err(PlacementError::Occupied(coord)),
            Some(None) => {}
        }

        self.resources.try_spend(&spec.cost)?;
        self.grid.set(coord, Some(kind));
        if let Some(production) = &spec.production {
            self.producers
                .push(Producer::new(coord, kind, production.interval, now));
        }
        info!("placed {kind} at {coord}");
        Ok(())
    }

    /// One frame of simulation: production, then upkeep.
    pub fn tick(&mut self, now: Duration) -> TickReport {
        let mut report = TickReport::default();
        self.run_production(now, &mut report);
        self.run_upkeep(&mut report);
        report
    }

    fn run_production(&mut self, now: Duration, report: &mut TickReport) {
        for producer in &mut self.producers {
            let Some(production) = self
                .table
                .get(producer.kind())
                .and_then(|spec| spec.production.as_ref())
            else {
                continue;
            };
            match producer.tick(now, production, &mut self.resources) {
                ProductionOutcome::Produced => report.produced += 1,
                ProductionOutcome::Starved => {
                    debug!("{} at {} had no inputs", producer.kind(), producer.coord());
                    report.starved += 1;
                }
                ProductionOutcome::NotReady => {}
            }
        }
    }

    /// Every standing building pays its upkeep once per frame if it can.
    /// A building that cannot pay suffers nothing.
    fn run_upkeep(&mut self, report: &mut TickReport) {
        for (_, cell) in self.grid.iter() {
            let Some(spec) = (*cell).and_then(|kind| self.table.get(kind)) else {
                continue;
            };
            if spec.upkeep.is_empty() {
                continue;
            }
            match self.resources.try_spend(&spec.upkeep) {
                Ok(()) => report.upkeep_paid += 1,
                Err(_) => report.upkeep_missed += 1,
            }
        }
    }
}
