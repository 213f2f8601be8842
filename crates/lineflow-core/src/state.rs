//! The operational state machine gating the assembly line.
//!
//! [`LineState`] is a plain tagged union with an explicit transition
//! function; the line holds the enum and there are no back-references
//! between state and line. Active and Idle are the two operational
//! sub-states, distinguished solely by whether the line is empty.
//!
//! Gating rules:
//!
//! | state             | tasks | advance | order intake |
//! |-------------------|-------|---------|--------------|
//! | OperationalActive | yes   | yes     | yes          |
//! | OperationalIdle   | yes   | yes     | yes          |
//! | Maintenance       | yes   | yes     | no           |
//! | Broken            | no    | no      | no           |
//!
//! `Broken` never self-transitions; the only way out is an explicit operator
//! [`set_state`](crate::line::AssemblyLine::set_state).

use crate::scheduler::Timestamp;
use serde::{Deserialize, Serialize};

/// Hours after which a drained Maintenance line schedules its re-check.
pub const MAINTENANCE_RECHECK_HOURS: u32 = 4;

/// The operational state of an assembly line. Exactly one is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineState {
    /// Operational with at least one occupied post.
    OperationalActive,
    /// Operational and empty.
    OperationalIdle,
    /// Under maintenance: work continues, no new orders enter.
    Maintenance,
    /// Broken: all task completion and advancement is rejected.
    Broken,
}

impl LineState {
    /// Whether task completion is legal in this state.
    pub fn accepts_tasks(self) -> bool {
        !matches!(self, LineState::Broken)
    }

    /// Whether advancement requests are legal in this state.
    pub fn accepts_advance(self) -> bool {
        !matches!(self, LineState::Broken)
    }

    /// Whether new orders may be pulled onto the line in this state.
    pub fn accepts_orders(self) -> bool {
        matches!(
            self,
            LineState::OperationalActive | LineState::OperationalIdle
        )
    }

    /// Whether this is one of the two operational sub-states.
    pub fn is_operational(self) -> bool {
        self.accepts_orders()
    }
}

/// Resolve the state after an advancement completed, given whether the line
/// is now empty. Returns the next state and, when a Maintenance line just
/// drained, the timestamp at which the caller must deliver the scheduled
/// re-check (an explicit callback; the engine never infers it from a clock).
pub fn transition_after_advance(
    state: LineState,
    line_empty: bool,
    now: Timestamp,
) -> (LineState, Option<Timestamp>) {
    match state {
        // Operational resolves to Idle iff the line is empty.
        LineState::OperationalActive | LineState::OperationalIdle => {
            let next = if line_empty {
                LineState::OperationalIdle
            } else {
                LineState::OperationalActive
            };
            (next, None)
        }
        // Maintenance lifts once the line drains, degrading straight to
        // Idle, and schedules the re-check.
        LineState::Maintenance => {
            if line_empty {
                (
                    LineState::OperationalIdle,
                    Some(now.plus_hours(MAINTENANCE_RECHECK_HOURS)),
                )
            } else {
                (LineState::Maintenance, None)
            }
        }
        // Broken never self-transitions.
        LineState::Broken => (LineState::Broken, None),
    }
}
