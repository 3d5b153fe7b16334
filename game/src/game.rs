use anyhow::Result;
use log::info;
use woodchain_engine::{rgb8, EngineContext, Game, HudLayer};

use crate::clock::{Clock, SystemClock};
use crate::config::GameConfig;
use crate::controls::apply_input;
use crate::simulation::Simulation;
use crate::view::build_hud;

/// The production chain game, driven by the engine's frame loop.
pub struct ProductionChainGame<C: Clock = SystemClock> {
    config: GameConfig,
    sim: Simulation,
    clock: C,
    hud: HudLayer,
}

impl ProductionChainGame {
    pub fn new(config: GameConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> ProductionChainGame<C> {
    pub fn with_clock(config: GameConfig, clock: C) -> Self {
        let sim = config.simulation();
        Self {
            config,
            sim,
            clock,
            hud: HudLayer::new(),
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }
}

impl<C: Clock> Game for ProductionChainGame<C> {
    fn init(&mut self, _ctx: &mut EngineContext) -> Result<()> {
        info!(
            "{} x {} grid, {} building types",
            self.sim.grid().rows(),
            self.sim.grid().cols(),
            self.sim.table().iter().count()
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext) -> Result<()> {
        let now = self.clock.now();
        apply_input(&mut self.sim, ctx.input().events(), now);
        self.sim.tick(now);
        Ok(())
    }

    fn draw(&mut self, ctx: &mut EngineContext) -> Result<()> {
        build_hud(&self.sim, &self.config, &mut self.hud);

        let renderer = ctx.renderer();
        let mut frame = renderer.begin_frame()?;
        frame.clear(rgb8(self.config.palette.background));
        self.hud.draw(frame.draw_list());
        renderer.end_frame(frame)
    }
}
