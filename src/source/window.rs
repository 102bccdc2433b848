//! Requested time window for a snapshot.

use std::fmt;
use std::num::NonZeroU32;

/// A validated snapshot window in hours.
///
/// Always within `MIN..=MAX`, so it can be forwarded to the Snapshot API
/// without further checks. User input goes through [`WindowHours::from_input`],
/// which falls back to the prior valid value instead of forwarding garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowHours(NonZeroU32);

impl WindowHours {
    /// Smallest selectable window.
    pub const MIN: u32 = 1;
    /// Largest selectable window (the API caps requests at 48h).
    pub const MAX: u32 = 48;

    /// Create a window, clamping into `MIN..=MAX`.
    pub fn new(hours: u32) -> Self {
        let clamped = hours.clamp(Self::MIN, Self::MAX);
        // clamped >= MIN >= 1
        Self(NonZeroU32::new(clamped).unwrap_or(NonZeroU32::MIN))
    }

    /// Parse user input for the period selector.
    ///
    /// Non-numeric and zero values yield `fallback`; values above `MAX` are
    /// clamped down.
    pub fn from_input(input: &str, fallback: WindowHours) -> Self {
        match input.trim().parse::<u32>() {
            Ok(0) | Err(_) => fallback,
            Ok(hours) => Self::new(hours),
        }
    }

    /// The window in hours.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// One hour longer, saturating at `MAX`.
    pub fn increment(self) -> Self {
        Self::new(self.get().saturating_add(1))
    }

    /// One hour shorter, saturating at `MIN`.
    pub fn decrement(self) -> Self {
        Self::new(self.get().saturating_sub(1))
    }
}

impl Default for WindowHours {
    fn default() -> Self {
        Self::new(24)
    }
}

impl fmt::Display for WindowHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_24h() {
        assert_eq!(WindowHours::default().get(), 24);
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(WindowHours::new(0).get(), 1);
        assert_eq!(WindowHours::new(12).get(), 12);
        assert_eq!(WindowHours::new(1000).get(), 48);
    }

    #[test]
    fn test_from_input_falls_back_to_prior_value() {
        let prior = WindowHours::new(6);
        assert_eq!(WindowHours::from_input("", prior), prior);
        assert_eq!(WindowHours::from_input("abc", prior), prior);
        assert_eq!(WindowHours::from_input("0", prior), prior);
        assert_eq!(WindowHours::from_input("-3", prior), prior);
        assert_eq!(WindowHours::from_input(" 12 ", prior).get(), 12);
        assert_eq!(WindowHours::from_input("99", prior).get(), 48);
    }

    #[test]
    fn test_increment_decrement_saturate() {
        assert_eq!(WindowHours::new(48).increment().get(), 48);
        assert_eq!(WindowHours::new(1).decrement().get(), 1);
        assert_eq!(WindowHours::new(10).increment().get(), 11);
        assert_eq!(WindowHours::new(10).decrement().get(), 9);
    }

    #[test]
    fn test_display() {
        assert_eq!(WindowHours::new(24).to_string(), "24h");
    }
}
