use crate::{DigitPool, LuckyError, Result};
use serde::{Deserialize, Serialize};

/// Numbers the user has entered, in insertion order and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnteredNumbers {
    numbers: Vec<String>,
}

impl EnteredNumbers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a number. Non-digit characters are dropped before the checks.
    pub fn add(&mut self, input: &str) -> Result<()> {
        let number = digits_only(input);
        if number.is_empty() {
            return Err(LuckyError::EmptyInput);
        }

        if self.contains(&number) {
            tracing::debug!("Rejected duplicate number {}", number);
            return Err(LuckyError::DuplicateNumber(number));
        }

        tracing::debug!("Added number {}", number);
        self.numbers.push(number);
        Ok(())
    }

    /// Remove exactly `number`, leaving every other entry in place.
    pub fn remove(&mut self, number: &str) -> Result<()> {
        let index = self
            .numbers
            .iter()
            .position(|n| n == number)
            .ok_or_else(|| LuckyError::NumberNotFound(number.to_string()))?;

        self.numbers.remove(index);
        tracing::debug!("Removed number {}", number);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.numbers.clear();
    }

    pub fn contains(&self, number: &str) -> bool {
        self.numbers.iter().any(|n| n == number)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.numbers
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn digit_pool(&self) -> DigitPool {
        DigitPool::from_entries(&self.numbers)
    }
}

impl<S: AsRef<str>> FromIterator<S> for EnteredNumbers {
    /// Collects the inputs, skipping empty and duplicate ones.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut entries = Self::new();
        for item in iter {
            let _ = entries.add(item.as_ref());
        }
        entries
    }
}

pub(crate) fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_strips_non_digits() {
        let mut entries = EnteredNumbers::new();
        entries.add(" 12-34a ").unwrap();
        assert_eq!(entries.as_slice(), &["1234".to_string()]);
    }

    #[test]
    fn test_add_empty_rejected() {
        let mut entries = EnteredNumbers::new();
        assert!(matches!(entries.add(""), Err(LuckyError::EmptyInput)));
        assert!(matches!(entries.add("abc"), Err(LuckyError::EmptyInput)));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut entries = EnteredNumbers::new();
        entries.add("888").unwrap();
        entries.add("123").unwrap();

        let err = entries.add("888").unwrap_err();
        assert!(matches!(err, LuckyError::DuplicateNumber(ref n) if n == "888"));
        assert_eq!(err.to_string(), "This number has already been added");
        assert_eq!(entries.as_slice(), &["888".to_string(), "123".to_string()]);
    }

    #[test]
    fn test_remove_only_that_value() {
        let mut entries: EnteredNumbers = ["12", "345", "67"].into_iter().collect();
        entries.remove("345").unwrap();

        assert_eq!(entries.as_slice(), &["12".to_string(), "67".to_string()]);
        assert_eq!(entries.digit_pool().digits(), &[1, 2, 6, 7]);
    }

    #[test]
    fn test_remove_missing() {
        let mut entries: EnteredNumbers = ["12"].into_iter().collect();
        assert!(matches!(
            entries.remove("99"),
            Err(LuckyError::NumberNotFound(_))
        ));
        assert_eq!(entries.len(), 1);
    }
}
