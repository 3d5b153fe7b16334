use std::time::Duration;

use woodchain_engine::CellCoord;

use crate::buildings::{BuildingKind, Production};
use crate::resources::Resources;

/// Where a producer's timer stands at a given moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Waiting { remaining: Duration },
    Ready,
}

/// What one production attempt did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductionOutcome {
    NotReady,
    Produced,
    /// The timer fired but the inputs were missing. The attempt still counts.
    Starved,
}

/// A placed building that runs a production timer.
///
/// Only `last_production` changes after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Producer {
    coord: CellCoord,
    kind: BuildingKind,
    interval: Duration,
    last_production: Duration,
}

impl Producer {
    pub fn new(coord: CellCoord, kind: BuildingKind, interval: Duration, now: Duration) -> Self {
        Self {
            coord,
            kind,
            interval,
            last_production: now,
        }
    }

    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    pub fn kind(&self) -> BuildingKind {
        self.kind
    }

    pub fn last_production(&self) -> Duration {
        self.last_production
    }

    pub fn state(&self, now: Duration) -> TimerState {
        let elapsed = now.saturating_sub(self.last_production);
        if elapsed >= self.interval {
            TimerState::Ready
        } else {
            TimerState::Waiting {
                remaining: self.interval - elapsed,
            }
        }
    }

    /// Run one conversion if the interval has passed.
    ///
    /// The timer restarts at `now` after every attempt, successful or not, so
    /// a long stall never yields more than one conversion.
    pub fn tick(
        &mut self,
        now: Duration,
        production: &Production,
        resources: &mut Resources,
    ) -> ProductionOutcome {
        if let TimerState::Waiting { .. } = self.state(now) {
            return ProductionOutcome::NotReady;
        }
        self.last_production = now;

        if resources.try_spend(&production.inputs).is_err() {
            return ProductionOutcome::Starved;
        }
        for output in &production.outputs {
            resources.add(output.kind, output.quantity);
        }
        ProductionOutcome::Produced
    }
}
