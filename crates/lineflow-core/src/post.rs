//! Work posts: the fixed stations of the assembly line.
//!
//! A [`WorkPost`] holds at most one [`AssemblyProcedure`] and is its
//! exclusive owner for the duration of occupancy. Ownership moves between
//! posts via [`WorkPost::take_procedure_from`], which enforces the adjacency
//! invariant: a post may only take from its immediate predecessor.
//!
//! The per-post minutes counter resets to zero whenever the held procedure
//! changes, so it always reflects work done on the current occupant only.

use crate::error::LineError;
use crate::procedure::AssemblyProcedure;
use crate::task::TaskType;
use serde::{Deserialize, Serialize};

/// Outcome of a [`WorkPost::complete_task`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskOutcome {
    /// `false` when the call was an idempotent no-op (the task, or all of the
    /// post's matching tasks, were already complete).
    pub completed: bool,
    /// Total minutes worked at this post, present exactly when this call
    /// finished the last of the post's matching tasks.
    pub post_finished: Option<u32>,
}

impl TaskOutcome {
    /// The defined no-op outcome for re-completing finished work.
    pub(crate) const ALREADY_COMPLETE: TaskOutcome = TaskOutcome {
        completed: false,
        post_finished: None,
    };
}

/// A station with a fixed task type, holding zero or one procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPost {
    /// Ordinal position in the line, fixed at construction.
    position: usize,
    /// The work category this post is specialized for.
    task_type: TaskType,
    /// The held procedure, if any. Exclusive ownership.
    held: Option<AssemblyProcedure>,
    /// Minutes of work done on the current occupant.
    minutes_worked: u32,
}

impl WorkPost {
    /// Create an empty post at the given position.
    pub fn new(position: usize, task_type: TaskType) -> Self {
        Self {
            position,
            task_type,
            held: None,
            minutes_worked: 0,
        }
    }

    /// Ordinal position in the line.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The work category this post is specialized for.
    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Whether this post currently holds a procedure.
    pub fn is_occupied(&self) -> bool {
        self.held.is_some()
    }

    /// The held procedure, if any (read-only).
    pub fn held(&self) -> Option<&AssemblyProcedure> {
        self.held.as_ref()
    }

    /// Minutes of work done on the current occupant.
    pub fn minutes_worked(&self) -> u32 {
        self.minutes_worked
    }

    /// Complete one task of this post's type on the held procedure.
    ///
    /// Fails with invalid-argument when `minutes` is negative, does not fit
    /// the counter, or `number` does not index a task of this post's type,
    /// and with invalid-state when the post is empty. Re-completing an
    /// already-complete task -- or any task once the post's matching work is
    /// done -- is a defined no-op, not an error. A rejected call never
    /// mutates anything.
    pub fn complete_task(&mut self, number: usize, minutes: i64) -> Result<TaskOutcome, LineError> {
        let position = self.position;
        let task_type = self.task_type;

        let procedure = self
            .held
            .as_mut()
            .ok_or(LineError::EmptyPost { post: position })?;

        let worked =
            u32::try_from(minutes).map_err(|_| LineError::MinutesOutOfRange { minutes })?;

        match procedure.task(number) {
            Some(task) if task.task_type() == task_type => {
                // Idempotence: re-completing a finished task leaves all
                // state untouched.
                if task.is_completed() {
                    return Ok(TaskOutcome::ALREADY_COMPLETE);
                }
            }
            _ => {
                return Err(LineError::TaskMismatch {
                    post: position,
                    task: number,
                    expected: task_type,
                });
            }
        }

        if procedure.is_finished_for(task_type) {
            return Ok(TaskOutcome::ALREADY_COMPLETE);
        }

        // The counter update is validated before the task flag flips, so an
        // overflowing call rejects cleanly instead of corrupting state.
        let new_total = self
            .minutes_worked
            .checked_add(worked)
            .ok_or(LineError::MinutesOutOfRange { minutes })?;

        procedure.complete_task(number);
        self.minutes_worked = new_total;

        let post_finished = procedure
            .is_finished_for(task_type)
            .then_some(self.minutes_worked);

        Ok(TaskOutcome {
            completed: true,
            post_finished,
        })
    }

    /// Transfer ownership of `other`'s held procedure (which may be absent)
    /// to this post, clearing `other` and resetting the minutes counter.
    ///
    /// Fails unless this post's position is exactly one greater than
    /// `other`'s, or when this post still holds a procedure.
    pub fn take_procedure_from(&mut self, other: &mut WorkPost) -> Result<(), LineError> {
        if self.position != other.position + 1 {
            return Err(LineError::NotAdjacent {
                from: other.position,
                to: self.position,
            });
        }
        if self.held.is_some() {
            return Err(LineError::PostOccupied {
                post: self.position,
            });
        }
        self.held = other.held.take();
        self.minutes_worked = 0;
        Ok(())
    }

    /// Whether every task matching this post's type is complete.
    /// Fails with invalid-state when the post is empty.
    pub fn is_finished(&self) -> Result<bool, LineError> {
        self.held
            .as_ref()
            .map(|p| p.is_finished_for(self.task_type))
            .ok_or(LineError::EmptyPost {
                post: self.position,
            })
    }

    /// Infallible variant of [`is_finished`](Self::is_finished) for the
    /// shift loop: an empty post is simply not occupied-and-finished.
    pub(crate) fn is_occupied_and_finished(&self) -> bool {
        self.held
            .as_ref()
            .is_some_and(|p| p.is_finished_for(self.task_type))
    }

    /// Place a freshly built procedure on this (empty, first) post.
    pub(crate) fn place(&mut self, procedure: AssemblyProcedure) -> Result<(), LineError> {
        if self.held.is_some() {
            return Err(LineError::PostOccupied {
                post: self.position,
            });
        }
        self.held = Some(procedure);
        self.minutes_worked = 0;
        Ok(())
    }

    /// Remove and return the held procedure (roll-off).
    pub(crate) fn take_held(&mut self) -> Option<AssemblyProcedure> {
        self.minutes_worked = 0;
        self.held.take()
    }

    /// Mutable access to the held procedure, for elapsed-time accrual.
    pub(crate) fn held_mut(&mut self) -> Option<&mut AssemblyProcedure> {
        self.held.as_mut()
    }
}
