//! Read-only snapshot types for UI-facing callers.
//!
//! Views copy the small, displayable facts out of the line so external
//! layers never hold references into engine state.

use crate::id::{OptionId, OrderId};
use crate::post::WorkPost;
use crate::task::{AssemblyTask, TaskType};

/// A read-only snapshot of one work post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkPostView {
    pub position: usize,
    pub task_type: TaskType,
    /// The order occupying this post, if any.
    pub order: Option<OrderId>,
    /// Minutes of work done on the current occupant.
    pub minutes_worked: u32,
    /// Whether the occupant's matching work is done; `None` when empty.
    pub finished: Option<bool>,
}

impl WorkPostView {
    pub(crate) fn of(post: &WorkPost) -> Self {
        Self {
            position: post.position(),
            task_type: post.task_type(),
            order: post.held().map(|p| p.order()),
            minutes_worked: post.minutes_worked(),
            finished: post
                .held()
                .map(|p| p.is_finished_for(post.task_type())),
        }
    }
}

/// A read-only snapshot of one assembly task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskView {
    pub number: usize,
    pub option: OptionId,
    pub task_type: TaskType,
    pub completed: bool,
}

impl TaskView {
    pub(crate) fn of(task: &AssemblyTask) -> Self {
        Self {
            number: task.number(),
            option: task.option(),
            task_type: task.task_type(),
            completed: task.is_completed(),
        }
    }
}
