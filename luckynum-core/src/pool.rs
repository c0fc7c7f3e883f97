use serde::Serialize;
use std::fmt;

/// Distinct decimal digits found across the entered numbers.
///
/// Digits keep first-occurrence order. The order does not change which values
/// can be drawn, only how an index source maps onto them.
///
/// Only `from_entries` builds a pool, so every digit is at most 9.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DigitPool {
    digits: Vec<u8>,
}

impl DigitPool {
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Self {
        let mut seen = [false; 10];
        let mut digits = Vec::with_capacity(10);

        for c in entries.iter().flat_map(|e| e.as_ref().chars()) {
            if let Some(d) = c.to_digit(10) {
                let d = d as u8;
                if !seen[d as usize] {
                    seen[d as usize] = true;
                    digits.push(d);
                }
            }
        }

        Self { digits }
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.digits.get(index).copied()
    }

    /// Value of the two digits at `first` and `second` written side by side.
    /// A leading zero gives a one-digit value ("07" is 7).
    pub fn candidate(&self, first: usize, second: usize) -> Option<u8> {
        Some(self.get(first)? * 10 + self.get(second)?)
    }

    /// Every distinct value in `[min, max]` the pool can produce, ascending.
    pub fn valid_values(&self, min: u8, max: u8) -> Vec<u8> {
        let mut values: Vec<u8> = self
            .digits
            .iter()
            .flat_map(|&a| self.digits.iter().map(move |&b| a * 10 + b))
            .filter(|v| (min..=max).contains(v))
            .collect();
        values.sort_unstable();
        values.dedup();
        values
    }
}

impl fmt::Display for DigitPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.digits.is_empty() {
            return write!(f, "Add numbers to see available digits");
        }

        let joined = self
            .digits
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Available digits: {}", joined)
    }
}
