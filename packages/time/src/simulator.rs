use std::{
    sync::{LazyLock, RwLock},
    time::SystemTime,
};

static NOW_OVERRIDE: LazyLock<RwLock<Option<SystemTime>>> = LazyLock::new(|| RwLock::new(None));

/// Pins the simulated clock to the given instant until [`reset_now`] is called.
///
/// # Panics
///
/// * If the `NOW_OVERRIDE` `RwLock` fails to write to
pub fn set_now(now: SystemTime) {
    log::debug!("set_now: now={now:?}");
    *NOW_OVERRIDE.write().unwrap() = Some(now);
}

/// Clears the simulated clock so [`now`] falls back to the system time.
///
/// # Panics
///
/// * If the `NOW_OVERRIDE` `RwLock` fails to write to
pub fn reset_now() {
    *NOW_OVERRIDE.write().unwrap() = None;
}

/// # Panics
///
/// * If the `NOW_OVERRIDE` `RwLock` fails to read from
#[must_use]
pub fn now() -> SystemTime {
    NOW_OVERRIDE.read().unwrap().unwrap_or_else(SystemTime::now)
}

#[cfg(feature = "chrono")]
#[must_use]
pub fn datetime_utc_now() -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::<chrono::Utc>::from(now())
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use serial_test::serial;

    use super::*;

    #[test_log::test]
    #[serial]
    fn now_returns_pinned_time() {
        let pinned = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        set_now(pinned);

        assert_eq!(now(), pinned);
        assert_eq!(now(), pinned);

        reset_now();
    }

    #[test_log::test]
    #[serial]
    fn now_falls_back_to_system_time_after_reset() {
        let pinned = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        set_now(pinned);
        reset_now();

        assert_ne!(now(), pinned);
    }
}
