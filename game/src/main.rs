use anyhow::Result;
use woodchain::{GameConfig, ProductionChainGame};
use woodchain_engine::Engine;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::default();
    let engine = Engine::with_config(config.engine_config());
    engine.run(ProductionChainGame::new(config))
}
