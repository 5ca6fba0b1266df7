//! Minute-offset geometry shared by the constraints that reason about which
//! pairs of shifts can physically conflict: [`NoOverlap`](super::no_overlap),
//! [`RestBetweenShifts`](super::rest_between_shifts), and
//! [`CumulativeFatigue`](super::cumulative_fatigue).
//!
//! These are template-level computations — minutes since midnight of the
//! shift's own day — not date-specific; DST correctness for actual
//! scheduled minutes is handled separately by [`shift_duration_minutes`].

use chrono::Timelike;
use nurseroster_core::domain::{Day, Shift};
use nurseroster_core::time::DailyInterval;

pub(super) const MINUTES_PER_DAY: i64 = 1440;

/// `[start, end)` in minutes since midnight of the shift's nominal day.
/// `end` may exceed 1440 for an overnight shift.
pub fn minute_span(interval: &DailyInterval) -> (i64, i64) {
    let start = interval.start_time.num_seconds_from_midnight() as i64 / 60;
    let nominal = interval.nominal_duration().num_minutes();
    (start, start + nominal)
}

#[inline]
fn intervals_overlap(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && b_start < a_end
}

/// True iff shift `a` and shift `b`, scheduled on the *same* day, occupy
/// overlapping minutes.
pub fn same_day_overlap(a: &Shift, b: &Shift) -> bool {
    let (a_start, a_end) = minute_span(&a.interval);
    let (b_start, b_end) = minute_span(&b.interval);
    intervals_overlap(a_start, a_end, b_start, b_end)
}

/// True iff shift `prev`, scheduled the day *before* shift `next`, still
/// occupies minutes that fall within `next`'s day (relevant for overnight
/// shifts whose tail spills into the following calendar day).
pub fn cross_day_overlap(prev: &Shift, next: &Shift) -> bool {
    let (prev_start, prev_end) = minute_span(&prev.interval);
    let (next_start, next_end) = minute_span(&next.interval);
    intervals_overlap(prev_start - MINUTES_PER_DAY, prev_end - MINUTES_PER_DAY, next_start, next_end)
}

/// Same as [`same_day_overlap`] but each shift's span is padded by its own
/// rest-before/rest-after minutes, for the `RestBetweenShifts` constraint.
pub fn same_day_overlap_padded(a: &Shift, b: &Shift) -> bool {
    let (a_start, a_end) = minute_span(&a.interval);
    let (b_start, b_end) = minute_span(&b.interval);
    intervals_overlap(
        a_start - a.rest_minutes_before as i64,
        a_end + a.rest_minutes_after as i64,
        b_start - b.rest_minutes_before as i64,
        b_end + b.rest_minutes_after as i64,
    )
}

/// Padded cross-day overlap at day-offset `offset` (1 = the immediately
/// preceding day, 2 = two days before, …), for `RestBetweenShifts`.
pub fn cross_day_overlap_padded(prev: &Shift, next: &Shift, offset: i64) -> bool {
    let (prev_start, prev_end) = minute_span(&prev.interval);
    let (next_start, next_end) = minute_span(&next.interval);
    let shift_minutes = offset * MINUTES_PER_DAY;
    intervals_overlap(
        prev_start - shift_minutes - prev.rest_minutes_before as i64,
        prev_end - shift_minutes + prev.rest_minutes_after as i64,
        next_start - next.rest_minutes_before as i64,
        next_end + next.rest_minutes_after as i64,
    )
}

/// Maximum day-offset at which a padded shift from an earlier day could
/// still reach into the current day: `ceil(max_pad_duration / 1440)`.
pub fn max_pad_offset_days(shifts: &[Shift]) -> usize {
    let max_pad = shifts
        .iter()
        .map(|s| {
            let (_, end) = minute_span(&s.interval);
            end + s.rest_minutes_after as i64
        })
        .max()
        .unwrap_or(0);
    ((max_pad + MINUTES_PER_DAY - 1) / MINUTES_PER_DAY).max(1) as usize
}

/// DST-aware duration in minutes of `shift` realized on calendar `day`.
pub fn shift_duration_minutes(shift: &Shift, day: &Day) -> i64 {
    let tz = day.range.start.timezone();
    shift
        .interval
        .to_range(tz, day.range.start.date())
        .map(|r| r.duration().num_minutes())
        .unwrap_or_else(|_| shift.interval.nominal_duration().num_minutes())
}

/// Flat `x*Z + z` duration table, replacing a per-row-allocated structure
/// with one owned vector sized once at construction.
#[derive(Debug)]
pub struct DurationTable {
    z: usize,
    minutes: Vec<i64>,
}

impl DurationTable {
    pub fn build(shifts: &[Shift], days: &[Day]) -> Self {
        let z = days.len();
        let mut minutes = vec![0i64; shifts.len() * z];
        for (xi, shift) in shifts.iter().enumerate() {
            for (zi, day) in days.iter().enumerate() {
                let is_holiday = false;
                if shift.is_scheduled_on(day.weekday, is_holiday) {
                    minutes[xi * z + zi] = shift_duration_minutes(shift, day);
                }
            }
        }
        Self { z, minutes }
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> i64 {
        self.minutes[x * self.z + z]
    }
}
