pub mod config;
pub mod draw;
pub mod play;

pub use config::{handle_config_command, ConfigCommands};
pub use draw::{handle_draw, handle_pool, handle_reveal, DrawArgs, PoolArgs, RevealArgs};
pub use play::{handle_play, PlayArgs};

use crate::render::{print_result, TerminalEffects};
use luckynum_core::{
    DigitPool, DrawMode, Drawer, GeneratorConfig, Result, ResultSet, RevealSequencer, RngSource,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn source(seed: Option<u64>) -> RngSource<StdRng> {
    match seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::new(StdRng::from_entropy()),
    }
}

/// Run one generation in `mode` and print it.
async fn generate(
    mode: DrawMode,
    pool: &DigitPool,
    config: &GeneratorConfig,
    seed: Option<u64>,
    sound: bool,
) -> Result<ResultSet> {
    match mode {
        DrawMode::Batch => {
            let result = Drawer::new(config.draw)?.draw_batch(pool, source(seed))?;
            print_result(&result);
            Ok(result)
        }
        DrawMode::Sequential => {
            let mut reveal = config.reveal.clone();
            reveal.sound_enabled = reveal.sound_enabled || sound;
            let animate = !reveal.reveal_delay.is_zero();

            let mut sequencer = RevealSequencer::new(config.draw, reveal)?;
            if let Some(seed) = seed {
                sequencer = sequencer.with_burst_seed(seed);
            }
            let mut effects = TerminalEffects::new(animate);
            sequencer.run(pool, source(seed), &mut effects).await
        }
    }
}
