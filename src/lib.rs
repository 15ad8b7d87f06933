#![forbid(unsafe_code)]

//! Visitor recurrence tracking and intro-animation duration policy.
//!
//! Persists a single per-visitor record (visit counter, last-visit instant,
//! skip preference) through a pluggable key-value store and derives the
//! intro-animation length from it: returning visitors inside a 7-day window
//! get a shortened animation, an explicit skip preference overrides
//! everything, and anyone else gets the full-length intro.
//!
//! Storage and decoding failures never surface as errors; the worst case is
//! always the first-time default with the full animation.

pub mod constants;
pub mod policy;
pub mod state;
pub mod storage;
pub mod tracker;

pub use policy::{
    AnimationDuration, PhasePlan, animation_duration, days_since_last_visit, is_returning_visitor,
};
pub use state::VisitorState;
pub use storage::{FileStore, MemoryStore, StateStore};
pub use tracker::{VisitorStats, VisitorTracker};
