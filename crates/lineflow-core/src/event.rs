//! Typed events describing what an advancement round did.
//!
//! There are no observer callbacks: events are explicit values returned from
//! [`AssemblyLine::advance`](crate::line::AssemblyLine::advance) and
//! [`AssemblyLine::set_state`](crate::line::AssemblyLine::set_state), and the
//! caller dispatches them (to the statistics registrars, the order catalog,
//! its own scheduler) exactly once.

use crate::id::OrderId;
use crate::procedure::ProcedureStatistics;
use crate::scheduler::Timestamp;
use crate::state::LineState;
use serde::{Deserialize, Serialize};

/// An event produced by the assembly line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineEvent {
    /// A finished procedure rolled off the last post. Fired exactly once per
    /// procedure.
    ProcedureCompleted {
        order: OrderId,
        statistics: ProcedureStatistics,
    },
    /// A pending order was pulled onto the line.
    OrderPlaced { order: OrderId, post: usize },
    /// The line changed state.
    StateChanged { from: LineState, to: LineState },
    /// A drained Maintenance line wants a re-check delivered at `at`.
    MaintenanceRecheckScheduled { at: Timestamp },
}

/// Discriminant tag for event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEventKind {
    ProcedureCompleted,
    OrderPlaced,
    StateChanged,
    MaintenanceRecheckScheduled,
}

impl LineEvent {
    /// Get the discriminant kind for this event.
    pub fn kind(&self) -> LineEventKind {
        match self {
            LineEvent::ProcedureCompleted { .. } => LineEventKind::ProcedureCompleted,
            LineEvent::OrderPlaced { .. } => LineEventKind::OrderPlaced,
            LineEvent::StateChanged { .. } => LineEventKind::StateChanged,
            LineEvent::MaintenanceRecheckScheduled { .. } => {
                LineEventKind::MaintenanceRecheckScheduled
            }
        }
    }
}

/// Result of one advancement round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvanceResult {
    /// Everything the round did, in occurrence order.
    pub events: Vec<LineEvent>,
    /// Number of fixpoint passes the shift loop ran (at least one).
    pub passes: u32,
}

impl AdvanceResult {
    /// The completion events of this round, in roll-off order.
    pub fn completions(&self) -> impl Iterator<Item = (OrderId, ProcedureStatistics)> + '_ {
        self.events.iter().filter_map(|e| match e {
            LineEvent::ProcedureCompleted { order, statistics } => Some((*order, *statistics)),
            _ => None,
        })
    }
}
