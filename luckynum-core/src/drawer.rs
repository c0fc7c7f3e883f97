use crate::{DigitPool, IndexSource, LuckyError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a run produces its numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Draw all numbers up front; nothing is shown unless every slot fills.
    Batch,
    /// Emit each number as soon as it is accepted, for timed reveals.
    #[default]
    Sequential,
}

impl std::str::FromStr for DrawMode {
    type Err = LuckyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "batch" => Ok(Self::Batch),
            "sequential" | "seq" => Ok(Self::Sequential),
            other => Err(LuckyError::config(format!("Unknown draw mode: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Numbers per result set
    pub count: usize,
    pub min: u8,
    pub max: u8,
    /// Total attempts shared by every slot of one run
    pub max_attempts: u32,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            count: 6,
            min: 1,
            max: 49,
            max_attempts: 100,
        }
    }
}

impl DrawConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(LuckyError::config("Count must be greater than 0"));
        }

        if self.min > self.max {
            return Err(LuckyError::config(format!(
                "Min {} is greater than max {}",
                self.min, self.max
            )));
        }

        if self.max > 99 {
            return Err(LuckyError::config("Max cannot exceed 99 for two-digit draws"));
        }

        if self.count > usize::from(self.max - self.min) + 1 {
            return Err(LuckyError::config(format!(
                "Cannot draw {} distinct numbers from [{}, {}]",
                self.count, self.min, self.max
            )));
        }

        if self.max_attempts == 0 {
            return Err(LuckyError::config("Max attempts must be greater than 0"));
        }

        Ok(())
    }
}

/// An accepted number and the slot it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnNumber {
    pub position: usize,
    pub value: u8,
    /// Attempts used by the run so far, including this one
    pub attempts: u32,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub id: Uuid,
    pub mode: DrawMode,
    pub numbers: Vec<u8>,
    pub attempts: u32,
    pub generated_at: DateTime<Utc>,
}

impl ResultSet {
    fn new(mode: DrawMode, numbers: Vec<u8>, attempts: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            numbers,
            attempts,
            generated_at: Utc::now(),
        }
    }

    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    /// Numbers zero-padded to two places, as shown on the balls.
    pub fn padded(&self) -> Vec<String> {
        self.numbers.iter().map(|n| format!("{:02}", n)).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Drawer {
    config: DrawConfig,
}

impl Drawer {
    pub fn new(config: DrawConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Draw every number before returning anything.
    pub fn draw_batch<S: IndexSource>(&self, pool: &DigitPool, mut source: S) -> Result<ResultSet> {
        self.check_pool(pool)?;

        let mut numbers = Vec::with_capacity(self.config.count);
        let mut attempts = 0;

        while numbers.len() < self.config.count && attempts < self.config.max_attempts {
            attempts += 1;
            if let Some(value) = self.attempt(pool, &mut source, &numbers) {
                numbers.push(value);
            }
        }

        if numbers.len() < self.config.count {
            tracing::warn!(
                "Batch draw exhausted {} attempts with {} of {} numbers",
                attempts,
                numbers.len(),
                self.config.count
            );
            return Err(LuckyError::InsufficientCombinations {
                drawn: numbers.len(),
                needed: self.config.count,
                attempts,
            });
        }

        tracing::info!("Batch draw produced {:?} in {} attempts", numbers, attempts);
        Ok(ResultSet::new(DrawMode::Batch, numbers, attempts))
    }

    /// Draw one number at a time; the iterator yields each as it is accepted.
    pub fn draw_sequential<S: IndexSource>(&self, pool: &DigitPool, source: S) -> SequentialDraw<S> {
        SequentialDraw {
            config: self.config,
            pool: pool.clone(),
            source,
            numbers: Vec::with_capacity(self.config.count),
            attempts: 0,
            state: SequenceState::Pending,
        }
    }

    /// Run either mode to completion.
    pub fn draw<S: IndexSource>(&self, mode: DrawMode, pool: &DigitPool, source: S) -> Result<ResultSet> {
        match mode {
            DrawMode::Batch => self.draw_batch(pool, source),
            DrawMode::Sequential => self.draw_sequential(pool, source).finish(),
        }
    }

    fn check_pool(&self, pool: &DigitPool) -> Result<()> {
        check_pool(&self.config, pool)
    }

    fn attempt<S: IndexSource>(&self, pool: &DigitPool, source: &mut S, used: &[u8]) -> Option<u8> {
        attempt(&self.config, pool, source, used)
    }
}

fn check_pool(config: &DrawConfig, pool: &DigitPool) -> Result<()> {
    if pool.is_empty() {
        return Err(LuckyError::EmptyPool);
    }

    // A pool that cannot reach `count` distinct values would only burn the
    // whole budget, so fail before the first attempt.
    let reachable = pool.valid_values(config.min, config.max).len();
    if reachable < config.count {
        tracing::debug!(
            "Pool {:?} reaches only {} valid values",
            pool.digits(),
            reachable
        );
        return Err(LuckyError::InsufficientCombinations {
            drawn: 0,
            needed: config.count,
            attempts: 0,
        });
    }

    Ok(())
}

fn attempt<S: IndexSource>(
    config: &DrawConfig,
    pool: &DigitPool,
    source: &mut S,
    used: &[u8],
) -> Option<u8> {
    let first = source.next_index(pool.len());
    let second = source.next_index(pool.len());
    let value = pool.candidate(first, second)?;

    if (config.min..=config.max).contains(&value) && !used.contains(&value) {
        Some(value)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceState {
    Pending,
    Drawing,
    Finished,
}

/// Iterator over the numbers of one sequential run.
///
/// Yields `Ok` for each accepted number in position order, or a single `Err`
/// if the pool is unusable or the attempt budget runs out. Fused afterwards.
#[derive(Debug)]
pub struct SequentialDraw<S> {
    config: DrawConfig,
    pool: DigitPool,
    source: S,
    numbers: Vec<u8>,
    attempts: u32,
    state: SequenceState,
}

impl<S: IndexSource> SequentialDraw<S> {
    pub fn drawn(&self) -> &[u8] {
        &self.numbers
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Drive the remaining slots and package the run.
    pub fn finish(mut self) -> Result<ResultSet> {
        for drawn in self.by_ref() {
            drawn?;
        }

        if self.numbers.len() < self.config.count {
            return Err(LuckyError::internal("Sequential draw stopped early"));
        }

        Ok(ResultSet::new(
            DrawMode::Sequential,
            std::mem::take(&mut self.numbers),
            self.attempts,
        ))
    }
}

impl<S: IndexSource> Iterator for SequentialDraw<S> {
    type Item = Result<DrawnNumber>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            SequenceState::Finished => return None,
            SequenceState::Pending => {
                if let Err(e) = check_pool(&self.config, &self.pool) {
                    self.state = SequenceState::Finished;
                    return Some(Err(e));
                }
                self.state = SequenceState::Drawing;
            }
            SequenceState::Drawing => {}
        }

        if self.numbers.len() >= self.config.count {
            self.state = SequenceState::Finished;
            return None;
        }

        while self.attempts < self.config.max_attempts {
            self.attempts += 1;
            if let Some(value) = attempt(&self.config, &self.pool, &mut self.source, &self.numbers) {
                let position = self.numbers.len();
                self.numbers.push(value);
                tracing::debug!(
                    "Slot {} drew {} after {} attempts",
                    position,
                    value,
                    self.attempts
                );
                return Some(Ok(DrawnNumber {
                    position,
                    value,
                    attempts: self.attempts,
                }));
            }
        }

        self.state = SequenceState::Finished;
        tracing::warn!(
            "Sequential draw exhausted {} attempts at slot {}",
            self.attempts,
            self.numbers.len()
        );
        Some(Err(LuckyError::InsufficientCombinations {
            drawn: self.numbers.len(),
            needed: self.config.count,
            attempts: self.attempts,
        }))
    }
}

impl<S: IndexSource> std::iter::FusedIterator for SequentialDraw<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RngSource, SequenceSource};

    fn assert_valid(result: &ResultSet) {
        assert_eq!(result.numbers.len(), 6);
        let mut sorted = result.numbers.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 6, "numbers must be distinct: {:?}", result.numbers);
        assert!(result.numbers.iter().all(|n| (1..=49).contains(n)));
    }

    #[test]
    fn test_batch_succeeds_with_rich_pool() {
        let pool = DigitPool::from_entries(&["1234567"]);
        let drawer = Drawer::default();

        for seed in 0..50 {
            let result = drawer.draw_batch(&pool, RngSource::seeded(seed)).unwrap();
            assert_valid(&result);
            assert_eq!(result.mode, DrawMode::Batch);
            assert!(result.attempts <= 100);
        }
    }

    #[test]
    fn test_batch_fails_with_four_nine() {
        let pool = DigitPool::from_entries(&["49", "944"]);
        let drawer = Drawer::default();

        let err = drawer.draw_batch(&pool, RngSource::seeded(1)).unwrap_err();
        assert!(matches!(
            err,
            LuckyError::InsufficientCombinations { needed: 6, .. }
        ));
    }

    #[test]
    fn test_empty_pool() {
        let drawer = Drawer::default();
        let pool = DigitPool::default();

        assert!(matches!(
            drawer.draw_batch(&pool, RngSource::seeded(0)),
            Err(LuckyError::EmptyPool)
        ));

        let mut seq = drawer.draw_sequential(&pool, RngSource::seeded(0));
        assert!(matches!(seq.next(), Some(Err(LuckyError::EmptyPool))));
        assert!(seq.next().is_none());
    }

    #[test]
    fn test_batch_budget_exhaustion_discards_progress() {
        // Pool [1, 2, 3, 4]; index 0 twice gives 11 over and over.
        let pool = DigitPool::from_entries(&["1234"]);
        let drawer = Drawer::default();
        let mut source = SequenceSource::new(vec![0]).unwrap();

        let err = drawer.draw_batch(&pool, &mut source).unwrap_err();
        match err {
            LuckyError::InsufficientCombinations {
                drawn,
                needed,
                attempts,
            } => {
                assert_eq!(drawn, 1);
                assert_eq!(needed, 6);
                assert_eq!(attempts, 100);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(source.consumed(), 200);
    }

    #[test]
    fn test_scripted_batch() {
        // Pool [1, 2, 3, 4, 5]
        let pool = DigitPool::from_entries(&["12345"]);
        let drawer = Drawer::default();
        // 11, 11 (dup), 55 (out of range), 12, 23, 34, 45, 41
        let source = SequenceSource::new(vec![0, 0, 0, 0, 4, 4, 0, 1, 1, 2, 2, 3, 3, 4, 3, 0]).unwrap();

        let result = drawer.draw_batch(&pool, source).unwrap();
        assert_eq!(result.numbers, vec![11, 12, 23, 34, 45, 41]);
        assert_eq!(result.attempts, 8);
    }

    #[test]
    fn test_sequential_yields_in_position_order() {
        let pool = DigitPool::from_entries(&["12345"]);
        let drawer = Drawer::default();
        let source = SequenceSource::new(vec![0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 3, 0]).unwrap();

        let drawn: Vec<DrawnNumber> = drawer
            .draw_sequential(&pool, source)
            .collect::<Result<_>>()
            .unwrap();

        let positions: Vec<usize> = drawn.iter().map(|d| d.position).collect();
        let values: Vec<u8> = drawn.iter().map(|d| d.value).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(values, vec![11, 12, 23, 34, 45, 41]);
        assert_eq!(drawn[5].attempts, 6);
    }

    #[test]
    fn test_sequential_is_bounded() {
        let pool = DigitPool::from_entries(&["1234"]);
        let drawer = Drawer::default();
        let mut seq = drawer.draw_sequential(&pool, SequenceSource::new(vec![0]).unwrap());

        assert_eq!(seq.next().unwrap().unwrap().value, 11);
        assert!(matches!(
            seq.next(),
            Some(Err(LuckyError::InsufficientCombinations { drawn: 1, .. }))
        ));
        assert!(seq.next().is_none());
        assert_eq!(seq.attempts(), 100);
    }

    #[test]
    fn test_sequential_finish() {
        let pool = DigitPool::from_entries(&["1234567"]);
        let drawer = Drawer::default();

        let result = drawer
            .draw(DrawMode::Sequential, &pool, RngSource::seeded(42))
            .unwrap();
        assert_valid(&result);
        assert_eq!(result.mode, DrawMode::Sequential);
    }

    #[test]
    fn test_zero_digit_draws() {
        // Pool [0, 5]: 05 and 50 and 55 and 00; only 5 is in range.
        let pool = DigitPool::from_entries(&["05"]);
        assert_eq!(pool.valid_values(1, 49), vec![5]);
        assert!(Drawer::default()
            .draw_batch(&pool, RngSource::seeded(3))
            .is_err());
    }

    #[test]
    fn test_config_validation() {
        assert!(DrawConfig::default().validate().is_ok());

        let bad = DrawConfig {
            count: 0,
            ..DrawConfig::default()
        };
        assert!(Drawer::new(bad).is_err());

        let bad = DrawConfig {
            min: 40,
            max: 42,
            ..DrawConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = DrawConfig {
            max_attempts: 0,
            ..DrawConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("batch".parse::<DrawMode>().unwrap(), DrawMode::Batch);
        assert_eq!("Sequential".parse::<DrawMode>().unwrap(), DrawMode::Sequential);
        assert!("random".parse::<DrawMode>().is_err());
    }

    #[test]
    fn test_padded() {
        let pool = DigitPool::from_entries(&["0123456"]);
        let source = SequenceSource::new(vec![0, 1, 0, 2, 0, 3, 0, 4, 0, 5, 0, 6]).unwrap();
        let result = Drawer::default().draw_batch(&pool, source).unwrap();
        assert_eq!(result.padded(), vec!["01", "02", "03", "04", "05", "06"]);
    }
}
