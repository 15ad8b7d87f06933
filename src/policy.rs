//! Recurrence classification and animation-duration policy
//!
//! Pure functions over a [`VisitorState`] snapshot; the current time is an
//! explicit argument so the policy can be tested with arbitrary clocks.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::constants::{duration, phases, recurrence};
use crate::state::VisitorState;

/// Intro-animation length decision, derived per page load and never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnimationDuration {
    /// Total animation length in milliseconds
    pub total_ms: u32,
    /// True for any classification other than the full first-time animation
    pub shortened: bool,
}

/// Breakdown of a total duration into the ordered intro phases
///
/// Scaled proportionally from the reference split in [`phases`]; parts
/// always sum to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhasePlan {
    pub loading_ms: u32,
    pub welcome_ms: u32,
    pub brand_ms: u32,
    pub transition_ms: u32,
}

impl AnimationDuration {
    pub fn phase_plan(&self) -> PhasePlan {
        let scale = |part: u32| -> u32 {
            (u64::from(part) * u64::from(self.total_ms) / u64::from(phases::REFERENCE_TOTAL_MS))
                as u32
        };
        let loading_ms = scale(phases::LOADING_MS);
        let welcome_ms = scale(phases::WELCOME_MS);
        let brand_ms = scale(phases::BRAND_MS);
        // Rounding remainder lands in the final phase so the parts sum exactly
        let transition_ms = self.total_ms - loading_ms - welcome_ms - brand_ms;
        PhasePlan {
            loading_ms,
            welcome_ms,
            brand_ms,
            transition_ms,
        }
    }
}

/// Whether the visitor's previous visit falls within the returning window
///
/// A single recorded visit is never "returning", regardless of how recent.
pub fn is_returning_visitor(state: &VisitorState, now: DateTime<Utc>) -> bool {
    let Some(last_visit) = state.last_visit else {
        return false;
    };
    if state.visit_count <= 1 {
        return false;
    }
    now.signed_duration_since(last_visit) <= Duration::days(recurrence::RETURNING_WINDOW_DAYS)
}

/// Pick the animation duration for a state snapshot
///
/// Strict priority: skip preference, then returning-visitor shortening, then
/// the full first-time animation.
pub fn animation_duration(state: &VisitorState, now: DateTime<Utc>) -> AnimationDuration {
    if state.skip_preference {
        return AnimationDuration {
            total_ms: duration::SKIP_TOTAL_MS,
            shortened: true,
        };
    }
    if is_returning_visitor(state, now) {
        return AnimationDuration {
            total_ms: duration::RETURNING_TOTAL_MS,
            shortened: true,
        };
    }
    AnimationDuration {
        total_ms: duration::FULL_TOTAL_MS,
        shortened: false,
    }
}

/// Whole days elapsed since the last recorded visit, if any
pub fn days_since_last_visit(state: &VisitorState, now: DateTime<Utc>) -> Option<i64> {
    state
        .last_visit
        .map(|last| now.signed_duration_since(last).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_visit(visit_count: u32, last_visit_ago: Duration) -> VisitorState {
        VisitorState {
            is_first_visit: visit_count <= 1,
            last_visit: Some(Utc::now() - last_visit_ago),
            skip_preference: false,
            visit_count,
        }
    }

    #[test]
    fn test_fresh_visitor_is_not_returning() {
        let state = VisitorState::default();
        assert!(!is_returning_visitor(&state, Utc::now()));
    }

    #[test]
    fn test_recent_second_visit_is_returning() {
        let state = state_with_visit(2, Duration::days(2));
        assert!(is_returning_visitor(&state, Utc::now()));
    }

    #[test]
    fn test_lapsed_visitor_is_not_returning() {
        let state = state_with_visit(2, Duration::days(10));
        assert!(!is_returning_visitor(&state, Utc::now()));
    }

    #[test]
    fn test_single_visit_is_never_returning() {
        // Even an instant-ago visit does not count with only one on record
        let state = state_with_visit(1, Duration::zero());
        assert!(!is_returning_visitor(&state, Utc::now()));
    }

    #[test]
    fn test_returning_window_boundary_is_inclusive() {
        let now = Utc::now();
        let mut state = state_with_visit(3, Duration::zero());

        state.last_visit = Some(now - Duration::days(7));
        assert!(is_returning_visitor(&state, now));

        state.last_visit = Some(now - Duration::days(7) - Duration::minutes(1));
        assert!(!is_returning_visitor(&state, now));
    }

    #[test]
    fn test_skip_preference_overrides_everything() {
        // Would otherwise be a first-time visitor with the full animation
        let state = VisitorState {
            skip_preference: true,
            ..VisitorState::default()
        };
        let duration = animation_duration(&state, Utc::now());
        assert_eq!(duration.total_ms, 500);
        assert!(duration.shortened);
    }

    #[test]
    fn test_fresh_visitor_gets_full_animation() {
        let duration = animation_duration(&VisitorState::default(), Utc::now());
        assert_eq!(duration.total_ms, 4000);
        assert!(!duration.shortened);
    }

    #[test]
    fn test_returning_visitor_gets_shortened_animation() {
        let state = state_with_visit(2, Duration::days(2));
        let duration = animation_duration(&state, Utc::now());
        assert_eq!(duration.total_ms, 1500);
        assert!(duration.shortened);
    }

    #[test]
    fn test_lapsed_visitor_gets_full_animation() {
        let state = state_with_visit(2, Duration::days(10));
        let duration = animation_duration(&state, Utc::now());
        assert_eq!(duration.total_ms, 4000);
        assert!(!duration.shortened);
    }

    #[test]
    fn test_days_since_last_visit_floors() {
        let now = Utc::now();
        let mut state = state_with_visit(2, Duration::zero());
        state.last_visit = Some(now - Duration::hours(60)); // 2.5 days
        assert_eq!(days_since_last_visit(&state, now), Some(2));

        state.last_visit = None;
        assert_eq!(days_since_last_visit(&state, now), None);
    }

    #[test]
    fn test_phase_plan_sums_to_total() {
        for total_ms in [500, 1500, 4000] {
            let plan = AnimationDuration {
                total_ms,
                shortened: total_ms != 4000,
            }
            .phase_plan();
            assert_eq!(
                plan.loading_ms + plan.welcome_ms + plan.brand_ms + plan.transition_ms,
                total_ms
            );
        }
    }

    #[test]
    fn test_phase_plan_scales_from_reference_split() {
        let plan = AnimationDuration {
            total_ms: 4500,
            shortened: false,
        }
        .phase_plan();
        assert_eq!(plan.loading_ms, 500);
        assert_eq!(plan.welcome_ms, 1500);
        assert_eq!(plan.brand_ms, 1500);
        assert_eq!(plan.transition_ms, 1000);
    }
}
