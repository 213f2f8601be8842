//! Shared helpers for tests. Available to downstream crates via the
//! `test-utils` feature.

use crate::id::{OptionId, OrderId};
use crate::line::AssemblyLine;
use crate::order::Order;
use crate::scheduler::{SchedulerIntermediate, Timestamp};
use crate::task::TaskType;

/// The canonical 3-post line: Body, Drivetrain, Accessories.
pub fn standard_line() -> AssemblyLine {
    AssemblyLine::new(
        &[TaskType::Body, TaskType::Drivetrain, TaskType::Accessories],
        SchedulerIntermediate::default(),
    )
    .expect("standard line has posts")
}

/// A 5-post line covering every task type.
pub fn full_line() -> AssemblyLine {
    AssemblyLine::new(&TaskType::ALL, SchedulerIntermediate::default())
        .expect("full line has posts")
}

/// An order with exactly one task per post of [`standard_line`].
pub fn standard_order(id: u32, expected_minutes: u32) -> Order {
    Order::new(OrderId(id), expected_minutes)
        .with_option(OptionId(100 + id), TaskType::Body)
        .with_option(OptionId(200 + id), TaskType::Drivetrain)
        .with_option(OptionId(300 + id), TaskType::Accessories)
}

/// Shorthand timestamp constructor for tests with known-valid fields.
pub fn ts(days: u32, hours: u32, minutes: u32) -> Timestamp {
    Timestamp::new(days, hours, minutes).expect("valid test timestamp")
}

/// Drive one order through every post of a line, completing its single
/// matching task at each stop with the given per-post minutes, and return
/// the number of completion events observed.
pub fn run_order_through(line: &mut AssemblyLine, order: Order, minutes_per_post: i64) -> usize {
    let post_count = line.posts().len();
    let mut completions = 0;

    let result = line.advance(vec![order]).expect("entry advance");
    completions += result.completions().count();

    for post in 0..post_count {
        // The order's tasks are numbered in line order.
        line.complete_task(post, post, minutes_per_post)
            .expect("task completion");
        let result = line.advance(Vec::new()).expect("advance");
        completions += result.completions().count();
    }
    completions
}
