//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the crate, providing a single source of truth for constant values.

/// Persistent storage constants
pub mod storage {
    /// Key under which the visitor record is persisted
    pub const STATE_KEY: &str = "portfolio_visitor_state";

    /// Directory name under the platform config dir for the default store
    pub const APP_DIR: &str = "portfolio";
}

/// Returning-visitor classification constants
pub mod recurrence {
    /// Visits within this many days of the previous one count as returning
    pub const RETURNING_WINDOW_DAYS: i64 = 7;
}

/// Intro-animation duration constants (milliseconds)
pub mod duration {
    /// Minimal duration when the user has opted out of the long intro
    pub const SKIP_TOTAL_MS: u32 = 500;

    /// Shortened duration for returning visitors
    pub const RETURNING_TOTAL_MS: u32 = 1500;

    /// Full duration for first-time or lapsed visitors
    pub const FULL_TOTAL_MS: u32 = 4000;
}

/// Animation phase breakdown reference (milliseconds)
///
/// Phase durations for other totals are scaled proportionally from this
/// reference split.
pub mod phases {
    /// Total of the reference phase split
    pub const REFERENCE_TOTAL_MS: u32 = 4500;

    /// Initial loading/fade-in phase
    pub const LOADING_MS: u32 = 500;

    /// Welcome message phase
    pub const WELCOME_MS: u32 = 1500;

    /// Brand/identity reveal phase
    pub const BRAND_MS: u32 = 1500;

    /// Transition into the page content
    pub const TRANSITION_MS: u32 = 1000;
}
