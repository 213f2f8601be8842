//! Lineflow Core -- the assembly-line advancement engine.
//!
//! Models a factory floor as a fixed sequence of work posts through which
//! in-progress orders (assembly procedures) move one step at a time, gated
//! by an operational state machine.
//!
//! # Advancement Round
//!
//! Each call to [`line::AssemblyLine::advance`] normalizes the whole line:
//!
//! 1. **Gate** -- the current [`state::LineState`] must accept advancement,
//!    and every occupied post must be finished.
//! 2. **Initial shift** -- the last post's procedure rolls off with a
//!    completion event; elapsed minutes accrue onto every held procedure;
//!    each post hands its procedure one step forward.
//! 3. **Fixpoint loop** -- roll-offs, order intake onto the first post, and
//!    adjacent transfers repeat until a full pass changes nothing.
//! 4. **Transition** -- the state machine resolves (Active/Idle by
//!    emptiness; Maintenance lifts once drained, scheduling a re-check).
//!
//! # Key Types
//!
//! - [`line::AssemblyLine`] -- the single entry point for task completion
//!   and advancement; owns posts, state, and time bookkeeping.
//! - [`post::WorkPost`] -- a station with a fixed task type holding zero or
//!   one procedure, exclusively owned and transferred, never shared.
//! - [`procedure::AssemblyProcedure`] -- the ordered task list for one
//!   order; finished-ness is derived, never stored.
//! - [`state::LineState`] -- Operational (Active/Idle), Maintenance, Broken;
//!   a tagged union with an explicit transition function.
//! - [`scheduler::SchedulerIntermediate`] -- elapsed-time and overtime
//!   bookkeeping fed by an external clock.
//! - [`event::LineEvent`] -- typed events returned to the caller; there are
//!   no observer callbacks.
//!
//! The engine is single-threaded and synchronous: every operation runs to
//! completion before returning, and ordering is caller-determined.

pub mod error;
pub mod event;
pub mod id;
pub mod line;
pub mod order;
pub mod post;
pub mod procedure;
pub mod query;
pub mod scheduler;
mod shift;
pub mod state;
pub mod task;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
