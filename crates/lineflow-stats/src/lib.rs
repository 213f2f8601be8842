//! Running statistics over assembly-line completion events.
//!
//! Consumes the core engine's [`LineEvent::ProcedureCompleted`] events and
//! maintains, per metric, an incrementally updated running average and a
//! growing `(value, day)` sample list whose median is computed on demand via
//! randomized quickselect ([`median::MedianSelector`]).
//!
//! # Usage
//!
//! ```ignore
//! let mut board = StatisticsBoard::new();
//! // Feed every event from each advancement round:
//! for event in &result.events {
//!     board.record_event(event);
//! }
//! // At the end of each working day:
//! board.end_day();
//! // Query metrics:
//! let median = board.median_delay();
//! let average = board.delay().average();
//! ```

pub mod median;
mod rng;

use lineflow_core::event::LineEvent;

pub use median::MedianSelector;

/// Q32.32 fixed-point used for averages and medians.
pub type Fixed64 = fixed::types::I32F32;

// ---------------------------------------------------------------------------
// Samples and registrars
// ---------------------------------------------------------------------------

/// One recorded measurement: the value and the working day it landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub value: i64,
    pub day: u64,
}

/// A running registrar for one metric: incremental average plus on-demand
/// quickselect median over the full sample history.
///
/// The average uses `avg' = avg + (value - avg) / count`, which never needs
/// the running sum and is exact up to fixed-point rounding.
#[derive(Debug, Clone)]
pub struct Registrar {
    label: &'static str,
    count: u64,
    average: Fixed64,
    samples: Vec<Sample>,
    selector: MedianSelector,
}

impl Registrar {
    /// Create an empty registrar for the named metric.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            count: 0,
            average: Fixed64::ZERO,
            samples: Vec::new(),
            selector: MedianSelector::new(0x5EED_1E55),
        }
    }

    /// The metric name.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Number of recorded samples.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// All samples, in recording order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The values recorded on one working day.
    pub fn values_on(&self, day: u64) -> impl Iterator<Item = i64> + '_ {
        self.samples
            .iter()
            .filter(move |s| s.day == day)
            .map(|s| s.value)
    }

    /// Record one measurement.
    pub fn record(&mut self, value: i64, day: u64) {
        self.count += 1;
        let v = Fixed64::from_num(value);
        self.average += (v - self.average) / Fixed64::from_num(self.count);
        self.samples.push(Sample { value, day });
    }

    /// The running average, zero before the first sample.
    pub fn average(&self) -> Fixed64 {
        self.average
    }

    /// The median of all samples, or `None` before the first one.
    /// Expected O(n) via quickselect; the sample list is never sorted.
    pub fn median(&mut self) -> Option<Fixed64> {
        // Borrow the values out before handing them to the selector.
        let values: Vec<i64> = self.samples.iter().map(|s| s.value).collect();
        self.selector.median(&values)
    }
}

// ---------------------------------------------------------------------------
// StatisticsBoard -- the event consumer
// ---------------------------------------------------------------------------

/// Owns the standard registrars and feeds them from line events.
///
/// Tracks two metrics: per-procedure **delay** (minutes over or under the
/// expected build time, recorded as each procedure rolls off) and daily
/// **throughput** (procedures completed per working day, recorded when the
/// day ends).
#[derive(Debug, Clone)]
pub struct StatisticsBoard {
    delay: Registrar,
    throughput: Registrar,
    current_day: u64,
    completed_today: u64,
}

impl StatisticsBoard {
    pub fn new() -> Self {
        Self {
            delay: Registrar::new("procedure delay"),
            throughput: Registrar::new("procedures per day"),
            current_day: 0,
            completed_today: 0,
        }
    }

    /// The working day samples are currently attributed to.
    pub fn current_day(&self) -> u64 {
        self.current_day
    }

    /// Procedures completed so far today.
    pub fn completed_today(&self) -> u64 {
        self.completed_today
    }

    /// The delay registrar (read-only).
    pub fn delay(&self) -> &Registrar {
        &self.delay
    }

    /// The throughput registrar (read-only).
    pub fn throughput(&self) -> &Registrar {
        &self.throughput
    }

    /// Consume one line event. Only completion events carry statistics;
    /// everything else is ignored.
    pub fn record_event(&mut self, event: &LineEvent) {
        if let LineEvent::ProcedureCompleted { statistics, .. } = event {
            self.delay.record(statistics.delay, self.current_day);
            self.completed_today += 1;
        }
    }

    /// Close the current working day: commit today's completion count to the
    /// throughput registrar and start the next day.
    pub fn end_day(&mut self) {
        self.throughput
            .record(self.completed_today as i64, self.current_day);
        self.completed_today = 0;
        self.current_day += 1;
    }

    /// Median procedure delay, if any procedure has completed.
    pub fn median_delay(&mut self) -> Option<Fixed64> {
        self.delay.median()
    }

    /// Median daily throughput, if any day has been closed.
    pub fn median_throughput(&mut self) -> Option<Fixed64> {
        self.throughput.median()
    }
}

impl Default for StatisticsBoard {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
