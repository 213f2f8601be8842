//! The layout manipulator: the two-phase shift algorithm that advances the
//! whole line to its next valid configuration in one call.
//!
//! # Phase 1 -- initial shift
//!
//! The last post's procedure (if any) is the finished candidate; it is
//! rolled off with a completion event, never dropped. Every held procedure
//! absorbs the line's elapsed minutes first. Then each post hands its
//! procedure to its successor in one unconditional step, from the
//! second-to-last post down to the first, so no procedure ever skips a post.
//!
//! # Phase 2 -- fixpoint loop
//!
//! Passes repeat until one makes no change:
//!
//! 1. an occupied-and-finished last post rolls its procedure off;
//! 2. an empty first post pulls the next pending order (when intake is
//!    enabled);
//! 3. every adjacent pair, scanned from last to first, transfers when the
//!    successor is empty and the predecessor finished.
//!
//! Each pass either moves at least one procedure forward or terminates the
//! loop, so the loop always halts: consecutive empty or finished posts
//! ripple fully within a single advancement call.
//!
//! Orders the fixpoint could not place stay in the supply; the line checks
//! the remainder after the shift and reports a leftover (a supply-accounting
//! bug) as [`LineError::SupplyNotDrained`](crate::error::LineError).

use crate::error::LineError;
use crate::event::LineEvent;
use crate::order::Order;
use crate::post::WorkPost;
use crate::procedure::AssemblyProcedure;
use std::collections::VecDeque;

/// What one shift run did, folded into the line's `AdvanceResult`.
#[derive(Debug, Default)]
pub(crate) struct ShiftOutcome {
    pub events: Vec<LineEvent>,
    pub passes: u32,
}

/// Run one full advancement over `posts`.
///
/// `elapsed_minutes` is the line time accrued since the previous advance;
/// `intake_enabled` is false under Maintenance, in which case `supply` is
/// never consulted.
pub(crate) fn run_shift(
    posts: &mut [WorkPost],
    elapsed_minutes: u32,
    supply: &mut VecDeque<Order>,
    intake_enabled: bool,
) -> Result<ShiftOutcome, LineError> {
    let Some(last) = posts.len().checked_sub(1) else {
        return Err(LineError::NoPosts);
    };
    let mut outcome = ShiftOutcome::default();

    // -- Phase 1: initial shift -----------------------------------------

    for post in posts.iter_mut() {
        if let Some(procedure) = post.held_mut() {
            procedure.add_elapsed(elapsed_minutes);
        }
    }

    if let Some(candidate) = posts[last].take_held() {
        outcome.events.push(completion_event(&candidate));
    }

    // Unconditional one-step shift; each target was just emptied by the
    // roll-off above or by the previous iteration.
    for i in (0..last).rev() {
        let (head, tail) = posts.split_at_mut(i + 1);
        tail[0].take_procedure_from(&mut head[i])?;
    }

    // -- Phase 2: fixpoint loop -----------------------------------------

    loop {
        outcome.passes += 1;
        let mut changed = false;

        if posts[last].is_occupied_and_finished() {
            if let Some(finished) = posts[last].take_held() {
                outcome.events.push(completion_event(&finished));
                changed = true;
            }
        }

        if intake_enabled
            && !posts[0].is_occupied()
            && let Some(order) = supply.pop_front()
        {
            let id = order.id;
            posts[0].place(AssemblyProcedure::from_order(&order))?;
            outcome.events.push(LineEvent::OrderPlaced { order: id, post: 0 });
            changed = true;
        }

        for i in (1..=last).rev() {
            let (head, tail) = posts.split_at_mut(i);
            if !tail[0].is_occupied() && head[i - 1].is_occupied_and_finished() {
                tail[0].take_procedure_from(&mut head[i - 1])?;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    Ok(outcome)
}

fn completion_event(procedure: &AssemblyProcedure) -> LineEvent {
    LineEvent::ProcedureCompleted {
        order: procedure.order(),
        statistics: procedure.statistics(),
    }
}
