//! The assembly line: the single entry point for task completion and
//! advancement.
//!
//! The line owns the ordered, fixed list of [`WorkPost`]s, the current
//! [`LineState`], and a [`SchedulerIntermediate`]. Every mutating call runs
//! synchronously to completion; an `advance` normalizes the whole line
//! atomically from the caller's perspective.
//!
//! Advancement is only legal once every occupied post is finished. That
//! precondition is tracked with finished/occupied counters maintained
//! incrementally on task completion and recomputed once per advance, rather
//! than rescanned on every call.

use crate::error::LineError;
use crate::event::{AdvanceResult, LineEvent};
use crate::order::Order;
use crate::post::{TaskOutcome, WorkPost};
use crate::query::{TaskView, WorkPostView};
use crate::scheduler::{SchedulerIntermediate, Timestamp};
use crate::shift;
use crate::state::{LineState, transition_after_advance};
use crate::task::TaskType;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A sequence of work posts with an operational state machine in front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyLine {
    /// The posts, in line order. Fixed size, fixed order.
    posts: Vec<WorkPost>,
    /// The current operational state.
    state: LineState,
    /// Time bookkeeping between the external clock and this line.
    scheduler: SchedulerIntermediate,
    /// Number of occupied posts whose matching work is done.
    finished_posts: usize,
    /// Number of occupied posts.
    occupied_posts: usize,
}

impl AssemblyLine {
    /// Build an idle line with one post per given task type, in order.
    pub fn new(
        task_types: &[TaskType],
        scheduler: SchedulerIntermediate,
    ) -> Result<Self, LineError> {
        if task_types.is_empty() {
            return Err(LineError::NoPosts);
        }
        let posts = task_types
            .iter()
            .enumerate()
            .map(|(position, &task_type)| WorkPost::new(position, task_type))
            .collect();
        Ok(Self {
            posts,
            state: LineState::OperationalIdle,
            scheduler,
            finished_posts: 0,
            occupied_posts: 0,
        })
    }

    /// The current operational state.
    pub fn state(&self) -> LineState {
        self.state
    }

    /// The posts, in line order (read-only).
    pub fn posts(&self) -> &[WorkPost] {
        &self.posts
    }

    /// Whether no post holds a procedure.
    pub fn is_empty(&self) -> bool {
        self.occupied_posts == 0
    }

    /// The time bookkeeping for this line (read-only).
    pub fn scheduler(&self) -> &SchedulerIntermediate {
        &self.scheduler
    }

    /// Feed a clock update to the line's scheduler.
    pub fn observe_time(&mut self, ts: Timestamp) -> Result<(), LineError> {
        self.scheduler.observe(ts)
    }

    /// Record externally reported shift overrun.
    pub fn record_overtime(&mut self, minutes: u32) {
        self.scheduler.record_overtime(minutes);
    }

    /// Operator action: force the line into a new state. This is the only
    /// way out of [`LineState::Broken`].
    pub fn set_state(&mut self, new: LineState) -> LineEvent {
        let from = self.state;
        self.state = new;
        LineEvent::StateChanged { from, to: new }
    }

    /// Complete one task at a post.
    ///
    /// Rejected with invalid-state while the line is Broken; otherwise
    /// delegated to the post. A completion that finishes the post's matching
    /// work bumps the finished-posts counter, which arms `advance`.
    pub fn complete_task(
        &mut self,
        post_index: usize,
        task_number: usize,
        minutes: i64,
    ) -> Result<TaskOutcome, LineError> {
        if !self.state.accepts_tasks() {
            return Err(LineError::TasksRejected { state: self.state });
        }
        let post = self
            .posts
            .get_mut(post_index)
            .ok_or(LineError::NoSuchPost(post_index))?;
        let outcome = post.complete_task(task_number, minutes)?;
        if outcome.post_finished.is_some() {
            self.finished_posts += 1;
        }
        Ok(outcome)
    }

    /// Advance the line: roll off, shift, and pull in one atomic round.
    ///
    /// `pending` is the supply of orders eligible to enter this round, front
    /// first. In the operational states the supply must be fully consumed by
    /// the round; anything left over is an internal-consistency failure in
    /// the caller's supply accounting, reported as
    /// [`LineError::SupplyNotDrained`] *after* the line has been normalized,
    /// with the round's events carried in the error so its roll-offs are
    /// never dropped. Under Maintenance the supply is not consulted at all.
    ///
    /// Fails with invalid-state while Broken or while any occupied post is
    /// unfinished.
    pub fn advance(&mut self, pending: Vec<Order>) -> Result<AdvanceResult, LineError> {
        if !self.state.accepts_advance() {
            return Err(LineError::AdvanceRejected { state: self.state });
        }
        if self.finished_posts < self.occupied_posts {
            return Err(LineError::PostsUnfinished {
                finished: self.finished_posts,
                occupied: self.occupied_posts,
            });
        }

        let elapsed = self.scheduler.drain_elapsed();
        let mut supply: VecDeque<Order> = pending.into();
        let intake = self.state.accepts_orders();

        let outcome = shift::run_shift(&mut self.posts, elapsed, &mut supply, intake)?;
        self.recount_posts();

        let mut events = outcome.events;
        let (next, recheck) =
            transition_after_advance(self.state, self.is_empty(), self.scheduler.now());
        if next != self.state {
            events.push(LineEvent::StateChanged {
                from: self.state,
                to: next,
            });
            self.state = next;
        }
        if let Some(at) = recheck {
            events.push(LineEvent::MaintenanceRecheckScheduled { at });
        }

        // The shift ran and the line is consistent; a leftover supply is
        // still reported loudly, with the events that already happened.
        if intake && !supply.is_empty() {
            return Err(LineError::SupplyNotDrained {
                remaining: supply.len(),
                events,
            });
        }

        Ok(AdvanceResult {
            events,
            passes: outcome.passes,
        })
    }

    /// Read-only snapshots of every post, in line order.
    pub fn work_post_views(&self) -> Vec<WorkPostView> {
        self.posts.iter().map(WorkPostView::of).collect()
    }

    /// Read-only snapshots of the tasks held at one post.
    pub fn tasks_at_post(&self, post_index: usize) -> Result<Vec<TaskView>, LineError> {
        let post = self
            .posts
            .get(post_index)
            .ok_or(LineError::NoSuchPost(post_index))?;
        Ok(post
            .held()
            .map(|procedure| procedure.tasks().iter().map(TaskView::of).collect())
            .unwrap_or_default())
    }

    /// Rebuild the finished/occupied counters after a shift changed
    /// occupancy wholesale. Runs once per advance.
    fn recount_posts(&mut self) {
        self.occupied_posts = self.posts.iter().filter(|p| p.is_occupied()).count();
        self.finished_posts = self
            .posts
            .iter()
            .filter(|p| p.is_occupied_and_finished())
            .count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::id::{OptionId, OrderId};

    fn line() -> AssemblyLine {
        AssemblyLine::new(
            &[TaskType::Body, TaskType::Drivetrain, TaskType::Accessories],
            SchedulerIntermediate::default(),
        )
        .unwrap()
    }

    fn full_order(id: u32) -> Order {
        Order::new(OrderId(id), 180)
            .with_option(OptionId(1), TaskType::Body)
            .with_option(OptionId(2), TaskType::Drivetrain)
            .with_option(OptionId(3), TaskType::Accessories)
    }

    #[test]
    fn new_line_is_idle_and_empty() {
        let line = line();
        assert_eq!(line.state(), LineState::OperationalIdle);
        assert!(line.is_empty());
        assert_eq!(line.posts().len(), 3);
    }

    #[test]
    fn empty_task_type_list_is_rejected() {
        let err = AssemblyLine::new(&[], SchedulerIntermediate::default()).unwrap_err();
        assert_eq!(err, LineError::NoPosts);
    }

    #[test]
    fn advance_with_order_activates_the_line() {
        let mut line = line();
        let result = line.advance(vec![full_order(1)]).unwrap();

        assert_eq!(line.state(), LineState::OperationalActive);
        assert!(result.events.iter().any(|e| matches!(
            e,
            LineEvent::StateChanged {
                from: LineState::OperationalIdle,
                to: LineState::OperationalActive,
            }
        )));
        assert!(line.posts()[0].is_occupied());
    }

    #[test]
    fn advance_blocked_while_an_occupied_post_is_unfinished() {
        let mut line = line();
        line.advance(vec![full_order(1)]).unwrap();

        let err = line.advance(Vec::new()).unwrap_err();
        assert_eq!(
            err,
            LineError::PostsUnfinished {
                finished: 0,
                occupied: 1
            }
        );
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        // Finishing the Body task re-arms advancement.
        line.complete_task(0, 0, 30).unwrap();
        line.advance(Vec::new()).unwrap();
        assert!(line.posts()[1].is_occupied());
    }

    #[test]
    fn idempotent_recompletion_does_not_rearm_counters() {
        let mut line = line();
        line.advance(vec![full_order(1)]).unwrap();
        line.complete_task(0, 0, 30).unwrap();

        // The no-op must not double-count the finished post.
        let outcome = line.complete_task(0, 0, 30).unwrap();
        assert!(!outcome.completed);
        line.advance(Vec::new()).unwrap();

        // After the shift the counters were rebuilt from scratch; a second
        // advance is legal because post 1 has not been worked yet.
        let err = line.advance(Vec::new()).unwrap_err();
        assert!(matches!(err, LineError::PostsUnfinished { .. }));
    }

    #[test]
    fn broken_rejects_tasks_and_advance() {
        let mut line = line();
        line.advance(vec![full_order(1)]).unwrap();
        line.set_state(LineState::Broken);

        let err = line.complete_task(0, 0, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        let err = line.advance(Vec::new()).unwrap_err();
        assert_eq!(
            err,
            LineError::AdvanceRejected {
                state: LineState::Broken
            }
        );

        // Operator action is the only way back.
        let event = line.set_state(LineState::OperationalActive);
        assert_eq!(
            event,
            LineEvent::StateChanged {
                from: LineState::Broken,
                to: LineState::OperationalActive
            }
        );
        line.complete_task(0, 0, 10).unwrap();
    }

    #[test]
    fn maintenance_advances_without_intake_then_lifts() {
        let mut line = line();
        line.observe_time(Timestamp::new(0, 8, 0).unwrap()).unwrap();
        line.advance(vec![full_order(1)]).unwrap();
        line.set_state(LineState::Maintenance);

        // Work the order down the line; no new orders may enter even though
        // the caller keeps none back (Maintenance never consults a supply).
        line.complete_task(0, 0, 20).unwrap();
        line.advance(Vec::new()).unwrap();
        assert!(!line.posts()[0].is_occupied());
        assert_eq!(line.state(), LineState::Maintenance);

        line.complete_task(1, 1, 20).unwrap();
        line.advance(Vec::new()).unwrap();
        assert_eq!(line.state(), LineState::Maintenance);

        line.complete_task(2, 2, 20).unwrap();
        line.observe_time(Timestamp::new(0, 9, 0).unwrap()).unwrap();
        let result = line.advance(Vec::new()).unwrap();

        // Drained: back to Idle with a 4-hour re-check scheduled.
        assert_eq!(line.state(), LineState::OperationalIdle);
        assert!(result.events.iter().any(|e| matches!(
            e,
            LineEvent::MaintenanceRecheckScheduled { at }
                if *at == Timestamp::new(0, 13, 0).unwrap()
        )));
    }

    #[test]
    fn advance_drains_scheduler_elapsed_into_procedures() {
        let mut line = line();
        line.observe_time(Timestamp::new(0, 6, 0).unwrap()).unwrap();
        line.advance(vec![full_order(1)]).unwrap();

        line.observe_time(Timestamp::new(0, 7, 30).unwrap()).unwrap();
        line.complete_task(0, 0, 50).unwrap();
        line.advance(Vec::new()).unwrap();

        let held = line.posts()[1].held().unwrap();
        assert_eq!(held.elapsed_minutes(), 90);
    }

    #[test]
    fn views_reflect_line_contents() {
        let mut line = line();
        line.advance(vec![full_order(1)]).unwrap();
        line.complete_task(0, 0, 25).unwrap();

        let views = line.work_post_views();
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].order, Some(OrderId(1)));
        assert_eq!(views[0].minutes_worked, 25);
        assert_eq!(views[0].finished, Some(true));
        assert_eq!(views[1].order, None);
        assert_eq!(views[1].finished, None);

        let tasks = line.tasks_at_post(0).unwrap();
        assert_eq!(tasks.len(), 3);
        assert!(tasks[0].completed);
        assert!(!tasks[1].completed);
        assert!(line.tasks_at_post(1).unwrap().is_empty());
        assert!(line.tasks_at_post(9).is_err());
    }

    #[test]
    fn bad_post_index_is_invalid_argument() {
        let mut line = line();
        let err = line.complete_task(9, 0, 10).unwrap_err();
        assert_eq!(err, LineError::NoSuchPost(9));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn leftover_supply_fails_loudly_with_round_events_kept() {
        let mut line = line();
        let body_only = Order::new(OrderId(1), 30).with_option(OptionId(1), TaskType::Body);
        line.advance(vec![body_only]).unwrap();
        line.complete_task(0, 0, 30).unwrap();

        // Order 1 ripples off, order 2 enters post 0 and blocks order 3.
        let err = line.advance(vec![full_order(2), full_order(3)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        let LineError::SupplyNotDrained { remaining, events } = err else {
            panic!("expected a supply accounting failure");
        };
        assert_eq!(remaining, 1);
        // The round's roll-off and placement still reach the caller.
        assert!(events.iter().any(|e| matches!(
            e,
            LineEvent::ProcedureCompleted {
                order: OrderId(1),
                ..
            }
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            LineEvent::OrderPlaced {
                order: OrderId(2),
                post: 0
            }
        )));

        // The shift itself happened and the counters track the new layout:
        // the unfinished order 2 still gates the next advance.
        assert_eq!(line.work_post_views()[0].order, Some(OrderId(2)));
        let err = line.advance(Vec::new()).unwrap_err();
        assert!(matches!(err, LineError::PostsUnfinished { .. }));
    }

    #[test]
    fn overtime_flows_through_the_line() {
        let mut line = line();
        line.record_overtime(200);
        assert_eq!(line.scheduler().overtime(), 200);

        // Day 0 works 14 of 16 scheduled hours; crossing into day 1 past
        // shift start decays the carry-over by the 120 minutes of slack.
        line.observe_time(Timestamp::new(0, 6, 0).unwrap()).unwrap();
        line.observe_time(Timestamp::new(0, 20, 0).unwrap()).unwrap();
        line.observe_time(Timestamp::new(1, 6, 30).unwrap()).unwrap();
        assert_eq!(line.scheduler().overtime(), 80);
    }
}
