//! Lucky number generator
//!
//! Entered numbers are reduced to a pool of distinct digits. Pairs of pooled
//! digits form candidate numbers, and six distinct ones in 1..=49 make up a
//! result. Results can be drawn in one go or revealed one at a time.

pub mod config;
pub mod drawer;
pub mod effects;
pub mod entries;
pub mod error;
pub mod pool;
pub mod random;
pub mod reveal;
pub mod session;

pub use config::GeneratorConfig;
pub use drawer::{DrawConfig, DrawMode, DrawnNumber, Drawer, ResultSet, SequentialDraw};
pub use effects::{Burst, Confetti};
pub use entries::EnteredNumbers;
pub use error::{LuckyError, Result};
pub use pool::DigitPool;
pub use random::{IndexSource, RngSource, SequenceSource};
pub use reveal::{
    ChannelEffects, NoEffects, RevealConfig, RevealEffects, RevealEvent, RevealSequencer,
    RevealState,
};
pub use session::{Session, SessionAction};

/// Draw a result for `entries` with the default rules and ambient randomness.
pub fn generate<S: AsRef<str>>(entries: &[S], mode: DrawMode) -> Result<ResultSet> {
    let pool = DigitPool::from_entries(entries);
    Drawer::default().draw(mode, &pool, RngSource::thread())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let result = generate(&["1234567"], DrawMode::Batch).unwrap();
        assert_eq!(result.numbers.len(), 6);

        assert!(matches!(
            generate::<&str>(&[], DrawMode::Sequential),
            Err(LuckyError::EmptyPool)
        ));
    }
}
