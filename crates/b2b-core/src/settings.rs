//! Global settings.
//!
//! [`Settings`] holds the **evaluation date**: the date treated as "today"
//! when aging open jobs and stamping deliveries.  It is a process-wide
//! singleton accessed via a `std::sync::OnceLock`.
//!
//! When no evaluation date is set, callers fall back to the system clock.
//! The value is stored as a date serial number (1 = January 1, 1900) so this
//! crate does not depend on the date type defined in `b2b-time`.

use std::sync::{Mutex, MutexGuard, OnceLock};

/// Process-wide settings used by b2b-rs.
pub struct Settings {
    /// The current evaluation date as a serial number.
    evaluation_date: Mutex<Option<i32>>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            evaluation_date: Mutex::new(None),
        })
    }

    fn slot(&self) -> MutexGuard<'_, Option<i32>> {
        // The guarded value is a plain `Option<i32>`, so a poisoned lock
        // still holds a consistent value.
        self.evaluation_date
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the evaluation date serial number, or `None` if the system
    /// clock should be used.
    pub fn evaluation_date_serial(&self) -> Option<i32> {
        *self.slot()
    }

    /// Set the evaluation date as a serial number.
    pub fn set_evaluation_date_serial(&self, serial: i32) {
        *self.slot() = Some(serial);
    }

    /// Clear the evaluation date, resetting it to "use today".
    pub fn reset_evaluation_date(&self) {
        *self.slot() = None;
    }
}

/// RAII guard that sets the evaluation date and restores the previous value
/// on drop.
///
/// ```
/// use b2b_core::{ScopedEvaluationDate, Settings};
///
/// {
///     let _guard = ScopedEvaluationDate::new(45_000);
///     assert_eq!(Settings::instance().evaluation_date_serial(), Some(45_000));
/// }
/// ```
#[must_use = "the previous evaluation date is restored when the guard drops"]
pub struct ScopedEvaluationDate {
    previous: Option<i32>,
}

impl ScopedEvaluationDate {
    /// Set the evaluation date to `serial` until the guard is dropped.
    pub fn new(serial: i32) -> Self {
        let settings = Settings::instance();
        let previous = settings.evaluation_date_serial();
        settings.set_evaluation_date_serial(serial);
        Self { previous }
    }
}

impl Drop for ScopedEvaluationDate {
    fn drop(&mut self) {
        let settings = Settings::instance();
        match self.previous {
            Some(serial) => settings.set_evaluation_date_serial(serial),
            None => settings.reset_evaluation_date(),
        }
    }
}
