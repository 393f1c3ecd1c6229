//! Time source for result-set identifiers.

use chrono::{DateTime, Utc};

/// Injected source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Render a timestamp as an opaque identifier, e.g.
/// `2024-03-01 12:00:00.12 +0000 UTC`.
///
/// Fractional seconds drop trailing zeros and are omitted on a whole second.
pub fn timestamp_id(at: DateTime<Utc>) -> String {
    let nanos = at.timestamp_subsec_nanos();
    let fraction = if nanos == 0 {
        String::new()
    } else {
        let digits = format!("{nanos:09}");
        format!(".{}", digits.trim_end_matches('0'))
    };
    format!("{}{fraction} +0000 UTC", at.format("%Y-%m-%d %H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_id_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 5).unwrap()
            + chrono::Duration::nanoseconds(42);
        assert_eq!(timestamp_id(at), "2024-03-01 12:00:05.000000042 +0000 UTC");
    }

    #[test]
    fn test_timestamp_id_trims_trailing_zeros() {
        let whole = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 5).unwrap();
        assert_eq!(timestamp_id(whole), "2024-03-01 12:00:05 +0000 UTC");

        let millis = whole + chrono::Duration::milliseconds(120);
        assert_eq!(timestamp_id(millis), "2024-03-01 12:00:05.12 +0000 UTC");
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
