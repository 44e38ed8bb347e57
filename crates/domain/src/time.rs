//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `created_at` and `updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return the timestamp a record touched now should carry.
///
/// Never earlier than `created_at`, so `updated_at >= created_at` holds even
/// if the wall clock stepped backwards.
#[must_use]
pub fn touched(created_at: Timestamp) -> Timestamp {
    now().max(created_at)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_not_go_before_creation_when_clock_is_behind() {
        let future = Utc::now() + Duration::hours(1);
        assert_eq!(touched(future), future);
    }

    #[test]
    fn should_use_wall_clock_when_creation_is_in_the_past() {
        let past = Utc::now() - Duration::hours(1);
        assert!(touched(past) > past);
    }
}
