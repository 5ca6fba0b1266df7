//! Time-indexed score history: a running record of every new-best score,
//! timestamped against when solving started, for the stats file writer in
//! `nurseroster-io` and for live progress reporting.

use std::time::Instant;

use nurseroster_core::score::StrictHardSoftScore;

/// One (time, score) sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorePoint {
    pub millis: u64,
    pub score: StrictHardSoftScore,
}

/// Records a new-best score on every improvement, along with the elapsed
/// time since the collector was created. Two improvements landing in the
/// same millisecond overwrite rather than append, since the series is
/// indexed by time, not by improvement count.
#[derive(Debug, Clone)]
pub struct ScoreStatistics {
    start: Instant,
    points: Vec<ScorePoint>,
    min: Option<StrictHardSoftScore>,
    max: Option<StrictHardSoftScore>,
}

impl ScoreStatistics {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            points: Vec::new(),
            min: None,
            max: None,
        }
    }

    /// Appends a sample at the current elapsed time, updating the running
    /// min/max. Overwrites the last sample if it falls on the same
    /// millisecond.
    pub fn record(&mut self, score: StrictHardSoftScore) {
        let millis = self.start.elapsed().as_millis() as u64;
        self.min = Some(self.min.map_or(score, |m| m.min(score)));
        self.max = Some(self.max.map_or(score, |m| m.max(score)));

        match self.points.last_mut() {
            Some(last) if last.millis == millis => last.score = score,
            _ => self.points.push(ScorePoint { millis, score }),
        }
    }

    pub fn points(&self) -> &[ScorePoint] {
        &self.points
    }

    pub fn min(&self) -> Option<StrictHardSoftScore> {
        self.min
    }

    pub fn max(&self) -> Option<StrictHardSoftScore> {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for ScoreStatistics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_points_in_elapsed_order() {
        let mut stats = ScoreStatistics::new();
        stats.record(StrictHardSoftScore::of(0, 0, -10));
        stats.record(StrictHardSoftScore::of(0, 0, -5));
        assert_eq!(stats.points().len(), 2);
        assert!(stats.points()[0].millis <= stats.points()[1].millis);
    }

    #[test]
    fn tracks_running_min_and_max() {
        let mut stats = ScoreStatistics::new();
        stats.record(StrictHardSoftScore::of(0, 0, -10));
        stats.record(StrictHardSoftScore::of(0, 0, 5));
        stats.record(StrictHardSoftScore::of(0, 0, -20));
        assert_eq!(stats.min(), Some(StrictHardSoftScore::of(0, 0, -20)));
        assert_eq!(stats.max(), Some(StrictHardSoftScore::of(0, 0, 5)));
    }

    #[test]
    fn empty_collector_has_no_points_or_extrema() {
        let stats = ScoreStatistics::new();
        assert!(stats.is_empty());
        assert!(stats.min().is_none());
        assert!(stats.max().is_none());
    }
}
