//! Indicator modes and the per-edge transition matrix
//!
//! Each edge (header/footer) runs the same flat state machine. Guards
//! (task present, cross-edge coordination, no-more gating) are evaluated
//! by the owning [`Indicator`](crate::indicator::Indicator) before an
//! event is sent; the matrix itself is pure and total — an event with no
//! entry leaves the mode unchanged.

use serde::Serialize;

/// Events driving indicator mode transitions
pub mod pull_events {
    /// Offset became > 0 under user control
    pub const DRAG_START: u32 = 1;
    /// Offset reached the trigger offset while dragging (guarded)
    pub const REACH_TRIGGER: u32 = 2;
    /// Offset fell back below the trigger offset before release
    pub const FALL_BACK: u32 = 3;
    /// User released without committing
    pub const RELEASE: u32 = 4;
    /// User released while armed, or a programmatic trigger committed
    pub const COMMIT: u32 = 5;
    /// Task callback is being invoked
    pub const TASK_START: u32 = 6;
    /// Task completion arrived (success, failure, or no-more)
    pub const TASK_COMPLETE: u32 = 7;
    /// Post-completion grace delay elapsed
    pub const GRACE_ELAPSED: u32 = 8;
    /// Spring-back reached the rest position
    pub const SETTLED: u32 = 9;
    /// Spring-back reached rest and the task reported no-more
    pub const SETTLED_NO_MORE: u32 = 10;
    /// Overscroll while no-more, with retrigger permitted by config
    pub const RETRIGGER: u32 = 11;
    /// Explicit controller reset
    pub const RESET: u32 = 12;
}

/// Map events to state transitions
///
/// Same contract as a widget interaction FSM: `on_event` returns the new
/// state for a `(state, event)` pair, or `None` when the event does not
/// transition out of the current state.
pub trait ModeTransitions:
    Clone + Copy + PartialEq + Eq + std::hash::Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Which edge of the scrollable an indicator guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Edge {
    /// The logical start edge (pull-to-refresh)
    Header,
    /// The logical end edge (load-more)
    Footer,
}

impl Edge {
    /// The opposite edge
    pub fn other(&self) -> Edge {
        match self {
            Edge::Header => Edge::Footer,
            Edge::Footer => Edge::Header,
        }
    }
}

/// Outcome of the last task run on an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TaskResult {
    /// No task has completed in the current cycle
    #[default]
    None,
    /// Task completed successfully
    Succeeded,
    /// Task failed (callback reported an error)
    Failed,
    /// Task reported that no further data exists for this edge
    NoMore,
}

/// Per-edge indicator mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum IndicatorMode {
    /// At rest; no overscroll
    #[default]
    Inactive,
    /// User is pulling, offset below the trigger offset
    Drag,
    /// Offset at or past the trigger offset; release will commit
    Armed,
    /// Commit decided, task about to be invoked
    Ready,
    /// Task callback is running
    Processing,
    /// Task completed; holding for visual confirmation
    Processed,
    /// Confirmation shown; offset returning to rest
    Done,
    /// No further data for this edge; persists until reset
    NoMore,
}

impl ModeTransitions for IndicatorMode {
    fn on_event(&self, event: u32) -> Option<Self> {
        use pull_events::*;
        use IndicatorMode::*;
        match (self, event) {
            (Inactive, DRAG_START) => Some(Drag),
            (Drag, REACH_TRIGGER) => Some(Armed),
            (Armed, FALL_BACK) => Some(Drag),
            (Drag, RELEASE) => Some(Inactive),
            (Armed, RELEASE) => Some(Inactive),
            (Armed, COMMIT) => Some(Ready),
            (Ready, TASK_START) => Some(Processing),
            (Processing, TASK_COMPLETE) => Some(Processed),
            (Processed, GRACE_ELAPSED) => Some(Done),
            (Processed, SETTLED) => Some(Inactive),
            (Processed, SETTLED_NO_MORE) => Some(NoMore),
            (Done, SETTLED) => Some(Inactive),
            (Done, SETTLED_NO_MORE) => Some(NoMore),
            (NoMore, RETRIGGER) => Some(Drag),
            // Controller reset; Ready/Processing are not interruptible so
            // the at-most-one-processing guarantee holds.
            (Drag, RESET) | (Armed, RESET) | (Processed, RESET) | (Done, RESET)
            | (NoMore, RESET) => Some(Inactive),
            _ => None,
        }
    }
}

impl IndicatorMode {
    /// Whether this edge currently holds its processing slot
    pub fn is_task_active(&self) -> bool {
        matches!(self, IndicatorMode::Ready | IndicatorMode::Processing)
    }

    /// Whether the user's pull can still change the armed decision
    pub fn is_user_driven(&self) -> bool {
        matches!(self, IndicatorMode::Drag | IndicatorMode::Armed)
    }

    /// Whether the indicator is waiting out the post-task confirmation
    pub fn is_confirming(&self) -> bool {
        matches!(self, IndicatorMode::Processed | IndicatorMode::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::pull_events::*;
    use super::IndicatorMode::*;
    use super::*;

    const ALL_MODES: [IndicatorMode; 8] =
        [Inactive, Drag, Armed, Ready, Processing, Processed, Done, NoMore];
    const ALL_EVENTS: [u32; 12] = [
        DRAG_START,
        REACH_TRIGGER,
        FALL_BACK,
        RELEASE,
        COMMIT,
        TASK_START,
        TASK_COMPLETE,
        GRACE_ELAPSED,
        SETTLED,
        SETTLED_NO_MORE,
        RETRIGGER,
        RESET,
    ];

    #[test]
    fn test_happy_path_refresh_cycle() {
        let mut mode = Inactive;
        for (event, expected) in [
            (DRAG_START, Drag),
            (REACH_TRIGGER, Armed),
            (COMMIT, Ready),
            (TASK_START, Processing),
            (TASK_COMPLETE, Processed),
            (GRACE_ELAPSED, Done),
            (SETTLED, Inactive),
        ] {
            mode = mode.on_event(event).expect("transition must exist");
            assert_eq!(mode, expected);
        }
    }

    #[test]
    fn test_fall_back_below_trigger() {
        assert_eq!(Armed.on_event(FALL_BACK), Some(Drag));
        assert_eq!(Drag.on_event(RELEASE), Some(Inactive));
    }

    #[test]
    fn test_no_more_is_sticky() {
        assert_eq!(Done.on_event(SETTLED_NO_MORE), Some(NoMore));
        // Without RETRIGGER or RESET nothing leaves NoMore
        for event in ALL_EVENTS {
            if event == RETRIGGER || event == RESET {
                continue;
            }
            assert_eq!(NoMore.on_event(event), None);
        }
        assert_eq!(NoMore.on_event(RETRIGGER), Some(Drag));
        assert_eq!(NoMore.on_event(RESET), Some(Inactive));
    }

    #[test]
    fn test_processing_is_not_resettable() {
        assert_eq!(Processing.on_event(RESET), None);
        assert_eq!(Ready.on_event(RESET), None);
    }

    #[test]
    fn test_matrix_totality() {
        // Every (mode, event) pair either transitions to a defined mode or
        // leaves the machine in place; no pair panics or invents a state.
        for mode in ALL_MODES {
            for event in ALL_EVENTS {
                if let Some(next) = mode.on_event(event) {
                    assert!(ALL_MODES.contains(&next));
                    assert_ne!(
                        next, mode,
                        "self-transitions are modeled as None for {mode:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_mode_predicates() {
        assert!(Ready.is_task_active());
        assert!(Processing.is_task_active());
        assert!(!Processed.is_task_active());
        assert!(Drag.is_user_driven());
        assert!(Armed.is_user_driven());
        assert!(Processed.is_confirming());
        assert!(Done.is_confirming());
        assert!(!Inactive.is_confirming());
    }
}
