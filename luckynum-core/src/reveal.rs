use crate::effects::{Burst, Confetti};
use crate::{
    DigitPool, DrawConfig, DrawnNumber, Drawer, IndexSource, LuckyError, ResultSet, Result,
};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Pause after clearing the previous result
    pub clear_delay: Duration,
    /// Pause after each reveal
    pub reveal_delay: Duration,
    pub sound_enabled: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            clear_delay: Duration::from_millis(100),
            reveal_delay: Duration::from_millis(800),
            sound_enabled: false,
        }
    }
}

impl RevealConfig {
    /// No pauses at all; for tests and non-interactive output.
    pub fn instant() -> Self {
        Self {
            clear_delay: Duration::ZERO,
            reveal_delay: Duration::ZERO,
            sound_enabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    Idle,
    Generating { filled: usize },
    Complete,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RevealEvent {
    /// Previous numbers were cleared and a new run started
    Cleared,
    Revealed {
        position: usize,
        value: u8,
        /// Particles relative to the revealed ball's centre
        burst: Burst,
        sound: bool,
    },
    Completed {
        result: ResultSet,
        confetti: Confetti,
    },
    Failed {
        reason: String,
    },
}

/// Receiver of reveal events. Front ends render them; a failing sink aborts
/// the run.
#[async_trait]
pub trait RevealEffects: Send {
    async fn on_event(&mut self, event: RevealEvent) -> Result<()>;
}

/// Ignores every event.
#[derive(Debug, Default)]
pub struct NoEffects;

#[async_trait]
impl RevealEffects for NoEffects {
    async fn on_event(&mut self, _event: RevealEvent) -> Result<()> {
        Ok(())
    }
}

/// Forwards events to an mpsc channel.
///
/// Events are best-effort: a dropped receiver does not stop the run.
#[derive(Debug, Clone)]
pub struct ChannelEffects {
    tx: mpsc::UnboundedSender<RevealEvent>,
}

impl ChannelEffects {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RevealEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl RevealEffects for ChannelEffects {
    async fn on_event(&mut self, event: RevealEvent) -> Result<()> {
        if self.tx.send(event).is_err() {
            tracing::debug!("Reveal event receiver dropped");
        }
        Ok(())
    }
}

/// Reveals one run's numbers one at a time, in position order.
#[derive(Debug)]
pub struct RevealSequencer {
    drawer: Drawer,
    config: RevealConfig,
    state: RevealState,
    burst_rng: StdRng,
}

impl RevealSequencer {
    pub fn new(draw: DrawConfig, config: RevealConfig) -> Result<Self> {
        Ok(Self {
            drawer: Drawer::new(draw)?,
            config,
            state: RevealState::Idle,
            burst_rng: StdRng::from_entropy(),
        })
    }

    /// Fix the burst particle randomness.
    pub fn with_burst_seed(mut self, seed: u64) -> Self {
        self.burst_rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.config.sound_enabled = enabled;
    }

    /// Run a full generation. Once started it runs to completion or failure.
    pub async fn run<S, E>(
        &mut self,
        pool: &DigitPool,
        source: S,
        effects: &mut E,
    ) -> Result<ResultSet>
    where
        S: IndexSource + Send,
        E: RevealEffects + ?Sized,
    {
        if pool.is_empty() {
            return Err(LuckyError::EmptyPool);
        }

        self.state = RevealState::Generating { filled: 0 };
        tracing::info!("Starting reveal from digits {:?}", pool.digits());

        match self.reveal_all(pool, source, effects).await {
            Ok(result) => {
                self.state = RevealState::Complete;
                tracing::info!("Reveal complete: {:?}", result.numbers);
                effects
                    .on_event(RevealEvent::Completed {
                        result: result.clone(),
                        confetti: Confetti::default(),
                    })
                    .await?;
                Ok(result)
            }
            Err(e) => {
                self.state = RevealState::Failed;
                tracing::warn!("Reveal failed: {}", e);
                effects
                    .on_event(RevealEvent::Failed {
                        reason: e.to_string(),
                    })
                    .await?;
                Err(e)
            }
        }
    }

    async fn reveal_all<S, E>(
        &mut self,
        pool: &DigitPool,
        source: S,
        effects: &mut E,
    ) -> Result<ResultSet>
    where
        S: IndexSource + Send,
        E: RevealEffects + ?Sized,
    {
        effects.on_event(RevealEvent::Cleared).await?;
        tokio::time::sleep(self.config.clear_delay).await;

        // The whole run is drawn before anything is shown, so a run that
        // runs out of attempts reveals nothing.
        let mut draw = self.drawer.draw_sequential(pool, source);
        let drawn: Vec<DrawnNumber> = draw.by_ref().collect::<Result<_>>()?;
        let result = draw.finish()?;

        for number in drawn {
            self.state = RevealState::Generating {
                filled: number.position + 1,
            };

            let burst = Burst::new(number.position, 0.0, 0.0, &mut self.burst_rng);
            effects
                .on_event(RevealEvent::Revealed {
                    position: number.position,
                    value: number.value,
                    burst,
                    sound: self.config.sound_enabled,
                })
                .await?;

            tokio::time::sleep(self.config.reveal_delay).await;
        }

        Ok(result)
    }
}
