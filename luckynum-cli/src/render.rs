use async_trait::async_trait;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use luckynum_core::effects::{Burst, Confetti};
use luckynum_core::{ResultSet, RevealEffects, RevealEvent, Result};
use std::io::Write;
use std::time::Duration;

const BURST_SNAPSHOT: Duration = Duration::from_millis(250);
const CONFETTI_FRAME: Duration = Duration::from_millis(250);
const CONFETTI_GLYPHS: [char; 3] = ['*', '+', 'o'];

/// Prints reveal events to the terminal as they arrive.
pub struct TerminalEffects {
    animate: bool,
}

impl TerminalEffects {
    pub fn new(animate: bool) -> Self {
        Self { animate }
    }

    /// Snapshot of the burst a quarter second in, dimmer glyphs for
    /// fainter particles.
    fn burst_line(burst: &Burst) -> String {
        burst
            .frame(BURST_SNAPSHOT)
            .iter()
            .map(|p| match p.opacity {
                o if o > 0.66 => '*',
                o if o > 0.33 => '+',
                _ => '.',
            })
            .collect()
    }

    async fn confetti(&self, confetti: &Confetti) {
        let per_frame = confetti.particles_per_frame() as usize;
        for (i, _) in confetti.frames(CONFETTI_FRAME).enumerate() {
            let line: String = (0..per_frame)
                .map(|k| CONFETTI_GLYPHS[(i + k) % CONFETTI_GLYPHS.len()])
                .flat_map(|c| [c, ' ', ' '])
                .collect();
            let indent = " ".repeat((i * 3) % 12);
            println!("{}{}", indent, line);
            if self.animate {
                tokio::time::sleep(CONFETTI_FRAME).await;
            }
        }
    }
}

#[async_trait]
impl RevealEffects for TerminalEffects {
    async fn on_event(&mut self, event: RevealEvent) -> Result<()> {
        match event {
            RevealEvent::Cleared => {
                println!("Drawing lucky numbers...");
                println!();
            }
            RevealEvent::Revealed {
                position,
                value,
                burst,
                sound,
            } => {
                if sound {
                    print!("\x07");
                }
                println!(
                    "  #{}  ({:02})  {}",
                    position + 1,
                    value,
                    Self::burst_line(&burst)
                );
                std::io::stdout().flush()?;
            }
            RevealEvent::Completed { result, confetti } => {
                println!();
                self.confetti(&confetti).await;
                println!();
                print_result(&result);
            }
            RevealEvent::Failed { reason } => {
                // The caller reports the error itself.
                tracing::debug!("Reveal failed: {}", reason);
            }
        }
        Ok(())
    }
}

pub fn print_result(result: &ResultSet) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#1", "#2", "#3", "#4", "#5", "#6"]);
    table.add_row(result.padded().into_iter().map(Cell::new));

    println!("{}", table);
    println!(
        "Run {} ({:?}, {} attempts)",
        result.id,
        result.mode,
        result.attempts
    );
}
