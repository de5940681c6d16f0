//! Named stage timers.
//!
//! Timing has no effect on results; each measured scope is also entered as a
//! `tracing` span so subscribers see the stage structure.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Accumulated wall time per stage name.
#[derive(Clone, Debug, Default)]
pub struct StageTimers {
    totals: BTreeMap<&'static str, Duration>,
    calls: BTreeMap<&'static str, usize>,
}

/// Snapshot of one stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerSummary {
    pub total: Duration,
    pub calls: usize,
}

impl StageTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` inside the named scope.
    pub fn measure<R>(&mut self, name: &'static str, f: impl FnOnce() -> R) -> R {
        let span = tracing::debug_span!("stage", name);
        let _guard = span.enter();
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();
        *self.totals.entry(name).or_default() += elapsed;
        *self.calls.entry(name).or_default() += 1;
        result
    }

    pub fn summary(&self, name: &str) -> Option<TimerSummary> {
        let total = *self.totals.get(name)?;
        let calls = self.calls.get(name).copied().unwrap_or(0);
        Some(TimerSummary { total, calls })
    }

    /// Stage names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.totals.keys().copied()
    }

    pub fn reset(&mut self) {
        self.totals.clear();
        self.calls.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_counts_calls() {
        let mut timers = StageTimers::new();
        let value = timers.measure("friction", || 42);
        timers.measure("friction", || ());
        timers.measure("pressure", || ());

        assert_eq!(value, 42);
        assert_eq!(timers.summary("friction").map(|s| s.calls), Some(2));
        assert_eq!(timers.names().collect::<Vec<_>>(), vec!["friction", "pressure"]);
        assert!(timers.summary("advection").is_none());

        timers.reset();
        assert!(timers.summary("friction").is_none());
    }
}
