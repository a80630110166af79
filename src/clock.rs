//! Timestamp sources for document and response metadata.

use chrono::Utc;

/// Trait for timestamp providers.
///
/// Every recorded time in the library goes through a `Clock`, so tests can
/// pin the clock instead of asserting on wall time.
pub trait Clock: Send + Sync {
    /// Current time as an ISO-8601 string.
    fn now(&self) -> String;
}

/// System clock reporting UTC wall time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        Utc::now().to_rfc3339()
    }
}

/// Clock that always reports the same instant.
///
/// Intended for tests that assert on recorded timestamps.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_system_clock_yields_iso8601() {
        let stamp = SystemClock.now();
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[test]
    fn test_fixed_clock_is_constant() {
        let clock = FixedClock("2024-01-01T00:00:00+00:00".to_string());
        assert_eq!(clock.now(), "2024-01-01T00:00:00+00:00");
        assert_eq!(clock.now(), clock.now());
    }
}
