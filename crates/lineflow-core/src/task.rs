//! Task types and individual assembly tasks.
//!
//! A [`TaskType`] doubles as a work post's specialty and a task's category:
//! a post only ever works on tasks of its own type. An [`AssemblyTask`] is
//! the smallest unit of work; its completion flag is monotonic and can never
//! revert to false.

use crate::id::OptionId;
use serde::{Deserialize, Serialize};

/// The fixed set of work categories on the factory floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    Body,
    Drivetrain,
    Accessories,
    Cargo,
    Certification,
}

impl TaskType {
    /// All task types, in canonical order.
    pub const ALL: [TaskType; 5] = [
        TaskType::Body,
        TaskType::Drivetrain,
        TaskType::Accessories,
        TaskType::Cargo,
        TaskType::Certification,
    ];
}

/// One unit of work tied to one option and one task-type category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyTask {
    /// Ordinal position within the owning procedure's task list.
    number: usize,
    /// The catalog option this task realizes.
    option: OptionId,
    /// The work category; determines which post may complete this task.
    task_type: TaskType,
    /// Monotonic completion flag.
    completed: bool,
}

impl AssemblyTask {
    /// Create a new, uncompleted task.
    pub fn new(number: usize, option: OptionId, task_type: TaskType) -> Self {
        Self {
            number,
            option,
            task_type,
            completed: false,
        }
    }

    /// Ordinal number of this task within its procedure.
    pub fn number(&self) -> usize {
        self.number
    }

    /// The catalog option this task realizes.
    pub fn option(&self) -> OptionId {
        self.option
    }

    /// The work category of this task.
    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Whether this task has been completed.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the task completed. Returns `true` if this call flipped the flag,
    /// `false` if the task was already complete. Completion never reverts.
    pub(crate) fn complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        true
    }
}
