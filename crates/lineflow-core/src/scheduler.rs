//! Time bookkeeping between the external clock and the line.
//!
//! The engine never reads a wall clock. An external time source feeds
//! [`Timestamp`]s into the [`SchedulerIntermediate`], which accumulates the
//! minutes elapsed since the previous advance (drained by
//! [`AssemblyLine::advance`](crate::line::AssemblyLine::advance)) and keeps
//! the running overtime counter across day boundaries.
//!
//! Overtime is clamped at zero from below. On a day-boundary update that has
//! crossed the shift's start-of-day time, the carry-over is reduced by the
//! slack left in the previous day:
//!
//! ```text
//! overtime' = max(0, overtime - (work_hours_per_day * 60 - minutes_worked_today))
//! ```

use crate::error::LineError;
use serde::{Deserialize, Serialize};

/// A point in simulated time: whole days plus a time of day.
///
/// Construction validates the time-of-day fields; ordering follows total
/// minutes since day zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    days: u32,
    hours: u32,
    minutes: u32,
}

impl Timestamp {
    /// Day zero, midnight.
    pub const ZERO: Timestamp = Timestamp {
        days: 0,
        hours: 0,
        minutes: 0,
    };

    /// Create a timestamp. Fails with invalid-argument when `hours >= 24` or
    /// `minutes >= 60`.
    pub fn new(days: u32, hours: u32, minutes: u32) -> Result<Self, LineError> {
        if hours >= 24 || minutes >= 60 {
            return Err(LineError::InvalidTimestamp { hours, minutes });
        }
        Ok(Self {
            days,
            hours,
            minutes,
        })
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Total minutes since day zero, midnight.
    pub fn total_minutes(&self) -> u64 {
        u64::from(self.days) * 24 * 60 + u64::from(self.hours) * 60 + u64::from(self.minutes)
    }

    /// Minutes since midnight of the current day.
    pub fn minutes_of_day(&self) -> u32 {
        self.hours * 60 + self.minutes
    }

    /// This timestamp shifted forward by whole hours, rolling over days.
    pub fn plus_hours(&self, hours: u32) -> Timestamp {
        let total = self.total_minutes() + u64::from(hours) * 60;
        Timestamp {
            days: (total / (24 * 60)) as u32,
            hours: ((total / 60) % 24) as u32,
            minutes: (total % 60) as u32,
        }
    }
}

/// Shift configuration: when the working day starts and how long it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkShift {
    /// Hour of day at which the shift starts.
    pub start_hour: u32,
    /// Scheduled working hours per day.
    pub work_hours_per_day: u32,
}

impl Default for WorkShift {
    /// A 06:00–22:00 working day.
    fn default() -> Self {
        Self {
            start_hour: 6,
            work_hours_per_day: 16,
        }
    }
}

/// Mediates between a monotonically non-decreasing time source and the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerIntermediate {
    shift: WorkShift,
    /// The most recent observed timestamp.
    last: Option<Timestamp>,
    /// The day `minutes_worked_today` refers to. A day stays open until an
    /// observation crosses the next day's shift start.
    work_day: u32,
    /// Running overtime carry-over, in minutes, never negative.
    overtime_minutes: u32,
    /// Minutes worked in the open day as of the last observation.
    minutes_worked_today: u32,
    /// Minutes accrued since the last advance drained this counter.
    elapsed_since_advance: u32,
}

impl SchedulerIntermediate {
    pub fn new(shift: WorkShift) -> Self {
        Self {
            shift,
            last: None,
            work_day: 0,
            overtime_minutes: 0,
            minutes_worked_today: 0,
            elapsed_since_advance: 0,
        }
    }

    /// The shift configuration.
    pub fn shift(&self) -> WorkShift {
        self.shift
    }

    /// The most recent observed timestamp, or [`Timestamp::ZERO`] before the
    /// first observation.
    pub fn now(&self) -> Timestamp {
        self.last.unwrap_or(Timestamp::ZERO)
    }

    /// Current overtime carry-over in minutes.
    pub fn overtime(&self) -> u32 {
        self.overtime_minutes
    }

    /// Minutes worked in the current day as of the last observation.
    pub fn minutes_worked_today(&self) -> u32 {
        self.minutes_worked_today
    }

    /// Record shift overrun reported by the external scheduling layer.
    /// The engine itself only decays this counter at day boundaries.
    pub fn record_overtime(&mut self, minutes: u32) {
        self.overtime_minutes += minutes;
    }

    /// Observe a new timestamp from the external clock.
    ///
    /// Fails with invalid-argument when time moves backwards. Accrues the
    /// delta into the elapsed counter and, when the update crosses a day
    /// boundary past the shift's start-of-day time, applies the overtime
    /// carry-over formula and starts a fresh working day.
    pub fn observe(&mut self, ts: Timestamp) -> Result<(), LineError> {
        let start_minutes = self.shift.start_hour * 60;
        // Minutes worked derive from the time of day relative to shift start;
        // before shift start the counter stays at zero.
        let worked_now = ts.minutes_of_day().saturating_sub(start_minutes);

        match self.last {
            None => {
                self.work_day = ts.days();
                self.minutes_worked_today = worked_now;
            }
            Some(last) => {
                if ts < last {
                    return Err(LineError::NonMonotonicTime);
                }
                let delta = (ts.total_minutes() - last.total_minutes()) as u32;
                self.elapsed_since_advance += delta;

                if ts.days() > self.work_day && ts.minutes_of_day() >= start_minutes {
                    // Close out the open day: decay overtime by its unused slack.
                    let scheduled = self.shift.work_hours_per_day * 60;
                    let slack = scheduled.saturating_sub(self.minutes_worked_today);
                    self.overtime_minutes = self.overtime_minutes.saturating_sub(slack);

                    // Fully skipped idle days each contribute their whole
                    // scheduled slack.
                    let skipped = ts.days() - self.work_day - 1;
                    if skipped > 0 {
                        self.overtime_minutes = self
                            .overtime_minutes
                            .saturating_sub(scheduled.saturating_mul(skipped));
                    }

                    self.work_day = ts.days();
                    self.minutes_worked_today = worked_now;
                } else if ts.days() == self.work_day {
                    self.minutes_worked_today = worked_now;
                }
                // A new day before shift start keeps the previous day open
                // until the boundary check can run.
            }
        }

        self.last = Some(ts);
        Ok(())
    }

    /// Take the minutes accrued since the previous advance, resetting the
    /// counter. Called once per advancement round.
    pub fn drain_elapsed(&mut self) -> u32 {
        std::mem::take(&mut self.elapsed_since_advance)
    }
}

impl Default for SchedulerIntermediate {
    fn default() -> Self {
        Self::new(WorkShift::default())
    }
}
