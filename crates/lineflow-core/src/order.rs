//! The order interface consumed from the external order-management layer.
//!
//! Order creation, validation, and restriction checking all live outside this
//! crate. An [`Order`] carries exactly what the line needs to build an
//! [`AssemblyProcedure`](crate::procedure::AssemblyProcedure): the selected
//! options with their work categories, and the expected build time.

use crate::id::{OptionId, OrderId};
use crate::task::TaskType;
use serde::{Deserialize, Serialize};

/// One selected option on an order, tagged with the work category that
/// realizes it on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedOption {
    pub option: OptionId,
    pub task_type: TaskType,
}

/// A pending order, already validated by the order-management layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Selected options, in the order their tasks will be numbered.
    pub options: Vec<OrderedOption>,
    /// Expected total build time in minutes.
    pub expected_minutes: u32,
}

impl Order {
    /// Create an order with no options yet.
    pub fn new(id: OrderId, expected_minutes: u32) -> Self {
        Self {
            id,
            options: Vec::new(),
            expected_minutes,
        }
    }

    /// Append an option (builder style).
    pub fn with_option(mut self, option: OptionId, task_type: TaskType) -> Self {
        self.options.push(OrderedOption { option, task_type });
        self
    }
}
