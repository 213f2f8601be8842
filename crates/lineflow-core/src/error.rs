//! Error types for the advancement engine.
//!
//! Failures fall into three classes, exposed through [`LineError::kind`]:
//!
//! - [`ErrorKind::InvalidArgument`] -- malformed indices, negative minutes,
//!   out-of-range timestamps. Always caller-correctable.
//! - [`ErrorKind::InvalidState`] -- the operation is not legal right now
//!   (wrong line state, empty post, unfinished posts). The caller re-checks
//!   preconditions and retries later if appropriate.
//! - [`ErrorKind::Internal`] -- a broken internal invariant. Indicates a bug
//!   in supply accounting, never absorbed silently.

use crate::event::LineEvent;
use crate::state::LineState;
use crate::task::TaskType;

/// The three failure classes of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
    Internal,
}

/// Errors surfaced by line, post, and scheduler operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("no post at index {0}")]
    NoSuchPost(usize),

    #[error("post {post} holds no procedure")]
    EmptyPost { post: usize },

    #[error("task {task} at post {post} does not exist or is not of type {expected:?}")]
    TaskMismatch {
        post: usize,
        task: usize,
        expected: TaskType,
    },

    #[error("work duration out of range: {minutes} minutes")]
    MinutesOutOfRange { minutes: i64 },

    #[error("post {to} can only take a procedure from its immediate predecessor, not post {from}")]
    NotAdjacent { from: usize, to: usize },

    #[error("post {post} already holds a procedure")]
    PostOccupied { post: usize },

    #[error("a line needs at least one post")]
    NoPosts,

    #[error("line is {state:?} and rejects task completions")]
    TasksRejected { state: LineState },

    #[error("line is {state:?} and rejects advancement")]
    AdvanceRejected { state: LineState },

    #[error("cannot advance: only {finished} of {occupied} occupied posts are finished")]
    PostsUnfinished { finished: usize, occupied: usize },

    #[error("invalid timestamp: {hours}h {minutes}m is out of range")]
    InvalidTimestamp { hours: u32, minutes: u32 },

    #[error("timestamp moved backwards")]
    NonMonotonicTime,

    #[error("order supply not drained after advance: {remaining} orders left over")]
    SupplyNotDrained {
        remaining: usize,
        /// Everything the aborted round already did. The roll-offs and
        /// placements in here were real; the caller still dispatches them.
        events: Vec<LineEvent>,
    },
}

impl LineError {
    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LineError::NoSuchPost(_)
            | LineError::TaskMismatch { .. }
            | LineError::MinutesOutOfRange { .. }
            | LineError::NotAdjacent { .. }
            | LineError::NoPosts
            | LineError::InvalidTimestamp { .. }
            | LineError::NonMonotonicTime => ErrorKind::InvalidArgument,

            LineError::EmptyPost { .. }
            | LineError::PostOccupied { .. }
            | LineError::TasksRejected { .. }
            | LineError::AdvanceRejected { .. }
            | LineError::PostsUnfinished { .. } => ErrorKind::InvalidState,

            LineError::SupplyNotDrained { .. } => ErrorKind::Internal,
        }
    }
}
