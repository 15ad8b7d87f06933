//! Visit recording and preference management over an injected store
//!
//! The tracker is the only writer of the persisted visitor record. It is
//! constructed with its [`StateStore`] so tests and embedders can substitute
//! an in-memory store for the default file-backed one.

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::constants::storage::STATE_KEY;
use crate::policy::{self, AnimationDuration};
use crate::state::VisitorState;
use crate::storage::StateStore;

/// Read-only diagnostics projection of the current visitor record
#[derive(Debug, Clone, Serialize)]
pub struct VisitorStats {
    pub visit_count: u32,
    pub is_first_visit: bool,
    pub days_since_last_visit: Option<i64>,
    pub is_returning_visitor: bool,
    pub skip_preference: bool,
}

/// Visitor tracking service bound to one storage key
pub struct VisitorTracker<S: StateStore> {
    store: S,
}

impl<S: StateStore> VisitorTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the current record, falling back to defaults on any failure
    pub fn load(&self) -> VisitorState {
        VisitorState::decode(self.store.get(STATE_KEY).as_deref())
    }

    /// Persist a record; returns whether the write succeeded
    pub fn save(&mut self, state: &VisitorState) -> bool {
        self.store.set(STATE_KEY, &state.encode())
    }

    /// Register a visit: stamp the time, bump the counter, persist
    ///
    /// `is_first_visit` reflects the pre-update count, so the visit taking
    /// the counter from 0 to 1 still reports a first visit. The only mutator
    /// of `visit_count` and `last_visit`.
    pub fn record_visit(&mut self) -> VisitorState {
        let current = self.load();
        let updated = VisitorState {
            is_first_visit: current.visit_count == 0,
            last_visit: Some(now_millis()),
            skip_preference: current.skip_preference,
            visit_count: current.visit_count.saturating_add(1),
        };
        if !self.save(&updated) {
            warn!("Visit recorded but could not be persisted");
        }
        info!(
            visit_count = updated.visit_count,
            first_visit = updated.is_first_visit,
            "Recorded visit"
        );
        updated
    }

    /// Overwrite only the skip preference, leaving visit history untouched
    pub fn set_skip_preference(&mut self, skip: bool) -> bool {
        let mut state = self.load();
        state.skip_preference = skip;
        info!(skip = skip, "Updated skip preference");
        self.save(&state)
    }

    /// Remove the persisted record; a subsequent load returns defaults
    pub fn reset(&mut self) -> bool {
        info!("Resetting visitor record");
        self.store.remove(STATE_KEY)
    }

    /// Diagnostics projection of the current record
    pub fn stats(&self) -> VisitorStats {
        let state = self.load();
        let now = Utc::now();
        VisitorStats {
            visit_count: state.visit_count,
            is_first_visit: state.is_first_visit,
            days_since_last_visit: policy::days_since_last_visit(&state, now),
            is_returning_visitor: policy::is_returning_visitor(&state, now),
            skip_preference: state.skip_preference,
        }
    }

    /// Animation duration for the current record, evaluated now
    pub fn animation_duration(&self) -> AnimationDuration {
        policy::animation_duration(&self.load(), Utc::now())
    }
}

/// Current instant truncated to millisecond precision
///
/// The record is stored at millisecond precision, so stamping at the same
/// precision keeps a returned snapshot equal to what a later load sees.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(now.timestamp_subsec_millis() * 1_000_000)
        .unwrap_or(now)
}
