//! In-progress assembly procedures.
//!
//! An [`AssemblyProcedure`] is the ordered task list for one order while it
//! occupies the line. It is created when an order is pulled onto the first
//! post and consumed when it rolls off the last post, at which point its
//! [`ProcedureStatistics`] are emitted with the completion event.
//!
//! "Finished" -- overall or per task type -- is always derived from the task
//! flags, never stored. Elapsed minutes only ever grow.

use crate::order::Order;
use crate::task::{AssemblyTask, TaskType};
use crate::id::OrderId;
use serde::{Deserialize, Serialize};

/// The ordered collection of assembly tasks for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyProcedure {
    /// The order this procedure realizes.
    order: OrderId,
    /// Tasks in fixed ordinal order; the list never grows or shrinks.
    tasks: Vec<AssemblyTask>,
    /// Expected total build time in minutes.
    expected_minutes: u32,
    /// Minutes spent on the line so far. Mutated only by non-negative addition.
    elapsed_minutes: u32,
}

/// Immutable statistics for one finished procedure, created once when it
/// rolls off the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureStatistics {
    /// Elapsed minus expected minutes. Negative when the build beat its
    /// estimate.
    pub delay: i64,
}

impl AssemblyProcedure {
    /// Build a procedure from a pending order. Tasks are numbered ordinally
    /// in the order's option order.
    pub fn from_order(order: &Order) -> Self {
        let tasks = order
            .options
            .iter()
            .enumerate()
            .map(|(number, opt)| AssemblyTask::new(number, opt.option, opt.task_type))
            .collect();
        Self {
            order: order.id,
            tasks,
            expected_minutes: order.expected_minutes,
            elapsed_minutes: 0,
        }
    }

    /// The owning order.
    pub fn order(&self) -> OrderId {
        self.order
    }

    /// The full task list, in ordinal order.
    pub fn tasks(&self) -> &[AssemblyTask] {
        &self.tasks
    }

    /// Look up a task by ordinal number.
    pub fn task(&self, number: usize) -> Option<&AssemblyTask> {
        self.tasks.get(number)
    }

    /// Expected total build time in minutes.
    pub fn expected_minutes(&self) -> u32 {
        self.expected_minutes
    }

    /// Minutes spent on the line so far.
    pub fn elapsed_minutes(&self) -> u32 {
        self.elapsed_minutes
    }

    /// Add line time to this procedure. The only mutation of elapsed time.
    pub fn add_elapsed(&mut self, minutes: u32) {
        self.elapsed_minutes += minutes;
    }

    /// Whether every task is complete.
    pub fn is_finished(&self) -> bool {
        self.tasks.iter().all(AssemblyTask::is_completed)
    }

    /// Whether every task of the given type is complete. Vacuously true when
    /// the procedure has no tasks of that type.
    pub fn is_finished_for(&self, task_type: TaskType) -> bool {
        self.tasks
            .iter()
            .filter(|t| t.task_type() == task_type)
            .all(AssemblyTask::is_completed)
    }

    /// Mark the numbered task complete. Returns `true` only when this call
    /// flipped the flag. The caller is responsible for task-type validation.
    pub(crate) fn complete_task(&mut self, number: usize) -> bool {
        match self.tasks.get_mut(number) {
            Some(task) => task.complete(),
            None => false,
        }
    }

    /// Statistics for this procedure as of now.
    pub fn statistics(&self) -> ProcedureStatistics {
        ProcedureStatistics {
            delay: i64::from(self.elapsed_minutes) - i64::from(self.expected_minutes),
        }
    }
}
