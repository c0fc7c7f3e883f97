use crate::entries::digits_only;
use crate::{DigitPool, EnteredNumbers, LuckyError, ResultSet, Result};

/// What pressing Enter led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Added(String),
    /// The caller should start a generation run
    Generate,
    /// Input was refused; the message is in `Session::error`
    Rejected,
    Nothing,
}

/// State of one interactive session: entered numbers, the pending input and
/// the message shown to the user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    entries: EnteredNumbers,
    input: String,
    sound_enabled: bool,
    error: Option<String>,
    last_result: Option<ResultSet>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    pub fn entries(&self) -> &EnteredNumbers {
        &self.entries
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_result(&self) -> Option<&ResultSet> {
        self.last_result.as_ref()
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Replace the pending input, keeping digits only.
    pub fn set_input(&mut self, raw: &str) {
        self.input = digits_only(raw);
        self.error = None;
    }

    /// Add the pending input as a number.
    pub fn add(&mut self) -> SessionAction {
        let input = std::mem::take(&mut self.input);
        match self.entries.add(&input) {
            Ok(()) => {
                self.error = None;
                SessionAction::Added(input)
            }
            Err(e) => {
                self.input = input;
                self.reject(e)
            }
        }
    }

    pub fn remove(&mut self, number: &str) -> Result<()> {
        self.entries.remove(number)
    }

    /// Enter key: add pending input if any, otherwise ask for a run.
    pub fn submit(&mut self) -> SessionAction {
        if !self.input.is_empty() {
            self.add()
        } else if !self.entries.is_empty() {
            SessionAction::Generate
        } else {
            SessionAction::Nothing
        }
    }

    /// Pool for a new run, or the reason one cannot start.
    pub fn begin_generation(&mut self) -> Result<DigitPool> {
        let pool = self.entries.digit_pool();
        if pool.is_empty() {
            self.error = Some(LuckyError::EmptyPool.to_string());
            return Err(LuckyError::EmptyPool);
        }

        self.error = None;
        self.last_result = None;
        Ok(pool)
    }

    /// Store the outcome of a run. Failed runs show no numbers.
    pub fn finish_generation(&mut self, outcome: &Result<ResultSet>) {
        match outcome {
            Ok(result) => {
                self.last_result = Some(result.clone());
                self.error = None;
            }
            Err(e) => {
                self.last_result = None;
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn digit_display(&self) -> String {
        self.entries.digit_pool().to_string()
    }

    fn reject(&mut self, error: LuckyError) -> SessionAction {
        tracing::debug!("Input rejected: {}", error);
        self.error = Some(error.to_string());
        SessionAction::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Drawer, RngSource};

    #[test]
    fn test_enter_adds_then_generates() {
        let mut session = Session::new();
        assert_eq!(session.submit(), SessionAction::Nothing);

        session.set_input("12a3");
        assert_eq!(session.input(), "123");
        assert_eq!(session.submit(), SessionAction::Added("123".to_string()));
        assert_eq!(session.input(), "");

        assert_eq!(session.submit(), SessionAction::Generate);
    }

    #[test]
    fn test_add_empty_sets_error() {
        let mut session = Session::new();
        assert_eq!(session.add(), SessionAction::Rejected);
        assert_eq!(session.error(), Some("Please enter a number"));
    }

    #[test]
    fn test_duplicate_keeps_entries() {
        let mut session = Session::new();
        session.set_input("77");
        session.add();
        session.set_input("77");

        assert_eq!(session.submit(), SessionAction::Rejected);
        assert_eq!(session.error(), Some("This number has already been added"));
        assert_eq!(session.entries().len(), 1);
        assert_eq!(session.input(), "77");

        session.set_input("8");
        assert!(session.error().is_none());
    }

    #[test]
    fn test_generation_round_trip() {
        let mut session = Session::new();
        assert!(session.begin_generation().is_err());
        assert_eq!(session.error(), Some("Please add some numbers first"));

        session.set_input("1234567");
        session.add();
        assert_eq!(session.digit_display(), "Available digits: 1, 2, 3, 4, 5, 6, 7");

        let pool = session.begin_generation().unwrap();
        let outcome = Drawer::default().draw_batch(&pool, RngSource::seeded(11));
        session.finish_generation(&outcome);
        assert_eq!(session.last_result().unwrap().numbers.len(), 6);
        assert!(session.error().is_none());
    }

    #[test]
    fn test_failed_generation_hides_numbers() {
        let mut session = Session::new();
        session.set_input("49");
        session.add();

        let pool = session.begin_generation().unwrap();
        let outcome = Drawer::default().draw_batch(&pool, RngSource::seeded(11));
        session.finish_generation(&outcome);

        assert!(session.last_result().is_none());
        assert!(session
            .error()
            .unwrap()
            .starts_with("Not enough valid combinations"));
    }

    #[test]
    fn test_remove_updates_digits() {
        let mut session = Session::new();
        for n in ["12", "34"] {
            session.set_input(n);
            session.add();
        }
        session.remove("12").unwrap();
        assert_eq!(session.digit_display(), "Available digits: 3, 4");
        assert!(session.toggle_sound());
        assert!(session.sound_enabled());
    }
}
