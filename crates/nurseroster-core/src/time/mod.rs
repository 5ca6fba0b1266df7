//! DST-aware time model: an `Instant` in a fixed IANA zone, half-open
//! `Range`s over instants, a forward-unbounded `Ray`, a sorted-and-merged
//! `RangeCollection`, and a `DailyInterval` (wall-clock start/end repeated
//! over a horizon of days).

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{CoreError, Result};

/// A single point in time, anchored to an IANA time zone.
///
/// Arithmetic (`+Duration`, comparisons) goes through `chrono`'s
/// `DateTime<Tz>`, so DST transitions are handled by the zone database
/// rather than by naive wall-clock addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    dt: DateTime<Tz>,
}

impl Instant {
    pub fn new(dt: DateTime<Tz>) -> Self {
        Self { dt }
    }

    /// Resolves a wall-clock date/time in `tz`, disambiguating DST gaps and
    /// overlaps by taking the earliest valid mapping.
    pub fn from_naive(tz: Tz, date: NaiveDate, time: NaiveTime) -> Result<Self> {
        let naive = date.and_time(time);
        match tz.from_local_datetime(&naive).earliest() {
            Some(dt) => Ok(Self { dt }),
            None => Err(CoreError::UnknownTimeZone(format!(
                "{naive} has no valid mapping in {tz}"
            ))),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.dt.timezone()
    }

    pub fn date(&self) -> NaiveDate {
        self.dt.date_naive()
    }

    pub fn as_datetime(&self) -> DateTime<Tz> {
        self.dt
    }

    pub fn day_of_week(&self) -> chrono::Weekday {
        self.dt.weekday()
    }

    /// Civil duration to `other`, accounting for any DST shift crossed.
    pub fn duration_until(&self, other: Instant) -> Duration {
        other.dt - self.dt
    }

    pub fn plus(&self, duration: Duration) -> Self {
        Self {
            dt: self.dt + duration,
        }
    }
}

/// Half-open interval `[start, end)` of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Instant,
    pub end: Instant,
}

impl Range {
    pub fn new(start: Instant, end: Instant) -> Self {
        debug_assert!(start <= end, "range start must not be after end");
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.start.duration_until(self.end)
    }

    pub fn contains(&self, instant: Instant) -> bool {
        instant >= self.start && instant < self.end
    }

    /// True iff the two half-open intervals share any instant.
    pub fn overlaps(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Gap (possibly negative, meaning overlap) between the end of `self`
    /// and the start of `other`.
    pub fn gap_until(&self, other: &Range) -> Duration {
        other.start.duration_until(self.end) * -1
    }
}

/// A forward-unbounded interval `[start, +inf)`, used for "no shift may
/// start before the employee's availability begins" style constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ray {
    pub start: Instant,
}

impl Ray {
    pub fn new(start: Instant) -> Self {
        Self { start }
    }

    pub fn contains(&self, instant: Instant) -> bool {
        instant >= self.start
    }
}

/// A sorted, non-overlapping set of [`Range`]s. `insert` merges any newly
/// touching or overlapping ranges to keep the invariant.
#[derive(Debug, Clone, Default)]
pub struct RangeCollection {
    ranges: Vec<Range>,
}

impl RangeCollection {
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Inserts `range`, merging with any ranges it touches or overlaps.
    pub fn insert(&mut self, range: Range) {
        let mut merged = range;
        let mut kept = Vec::with_capacity(self.ranges.len() + 1);
        for existing in self.ranges.drain(..) {
            if existing.overlaps(&merged) || existing.end == merged.start || merged.end == existing.start {
                merged = Range::new(
                    merged.start.min(existing.start),
                    merged.end.max(existing.end),
                );
            } else {
                kept.push(existing);
            }
        }
        kept.push(merged);
        kept.sort_by_key(|r| r.start);
        self.ranges = kept;
    }

    pub fn contains(&self, instant: Instant) -> bool {
        self.ranges.iter().any(|r| r.contains(instant))
    }

    /// True iff `range` is fully covered by the union of stored ranges.
    pub fn covers(&self, range: &Range) -> bool {
        let mut cursor = range.start;
        for r in &self.ranges {
            if r.start > cursor {
                break;
            }
            if r.end > cursor {
                cursor = r.end;
            }
            if cursor >= range.end {
                return true;
            }
        }
        false
    }

    pub fn any_overlaps(&self, range: &Range) -> bool {
        self.ranges.iter().any(|r| r.overlaps(range))
    }
}

/// A wall-clock `[start_time, end_time)` interval repeated daily across a
/// horizon, e.g. "no calls between 22:00 and 06:00" independent of date.
///
/// `end_time <= start_time` denotes an overnight span that crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyInterval {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl DailyInterval {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    pub fn is_overnight(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Materializes this interval anchored at `date` in `tz`, handling the
    /// overnight wraparound by pushing `end` to the following day.
    pub fn to_range(&self, tz: Tz, date: NaiveDate) -> Result<Range> {
        let start = Instant::from_naive(tz, date, self.start_time)?;
        let end_date = if self.is_overnight() {
            date.succ_opt().ok_or_else(|| {
                CoreError::UnknownTimeZone("date overflow materializing overnight interval".into())
            })?
        } else {
            date
        };
        let end = Instant::from_naive(tz, end_date, self.end_time)?;
        Ok(Range::new(start, end))
    }

    /// Nominal wall-clock duration, ignoring DST (use `to_range(...).duration()`
    /// for the DST-correct value on a specific date).
    pub fn nominal_duration(&self) -> Duration {
        if self.is_overnight() {
            Duration::hours(24) - (self.start_time - self.end_time)
        } else {
            self.end_time - self.start_time
        }
    }
}
