//! Domain entities: shifts, employees, days, and skills, plus the small
//! value types their attribute schemas are built from.
//!
//! Every entity here is immutable once the instance is loaded — axes of
//! these types are owned by the solver configuration and only ever
//! borrowed by `State`.

use std::collections::HashMap;

use crate::time::{DailyInterval, Instant, Range, RangeCollection};

/// Seven weekday bits (bit 0 = Monday) plus a holiday bit at bit 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdayMask(pub u8);

impl WeekdayMask {
    pub const HOLIDAY_BIT: u8 = 1 << 7;

    pub fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub fn from_weekday(weekday: chrono::Weekday) -> Self {
        Self(1 << weekday.num_days_from_monday())
    }

    pub fn contains_weekday(&self, weekday: chrono::Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_monday()) != 0
    }

    pub fn is_holiday(&self) -> bool {
        self.0 & Self::HOLIDAY_BIT != 0
    }

    pub fn with_holiday(mut self, holiday: bool) -> Self {
        if holiday {
            self.0 |= Self::HOLIDAY_BIT;
        } else {
            self.0 &= !Self::HOLIDAY_BIT;
        }
        self
    }
}

/// Minimum accepted skill weight for a single required skill.
pub type SkillWeight = u32;

/// A shift template: a recurring daily interval with slot counts, rest
/// requirements, and skill requirements, resolved against concrete calendar
/// days by the axis that owns the horizon.
#[derive(Debug, Clone)]
pub struct Shift {
    pub index: usize,
    pub name: String,
    pub weekday_mask: WeekdayMask,
    pub interval: DailyInterval,
    pub default_slot_count: u32,
    pub slot_overrides: HashMap<usize, u32>,
    pub min_slots: u32,
    pub max_slots: u32,
    /// Per-day minimum slot count, for shifts whose required coverage varies
    /// by calendar day (parallel to `slot_overrides`, falls back to
    /// `min_slots` when no day-specific minimum was recorded).
    pub min_slot_overrides: HashMap<usize, u32>,
    pub rest_minutes_before: u32,
    pub rest_minutes_after: u32,
    pub consecutive_rest_minutes: u32,
    pub required_all_skills: HashMap<usize, SkillWeight>,
    pub required_one_skills: HashMap<usize, SkillWeight>,
    pub blocked_next_day_shifts: Vec<usize>,
}

impl Shift {
    /// Slot count required on calendar day `day_index`, falling back to the
    /// default when no per-day override exists.
    pub fn slot_count_on(&self, day_index: usize) -> u32 {
        self.slot_overrides
            .get(&day_index)
            .copied()
            .unwrap_or(self.default_slot_count)
    }

    /// Minimum slot count required on calendar day `day_index`, falling back
    /// to `min_slots` when no day-specific minimum was recorded.
    pub fn min_slot_count_on(&self, day_index: usize) -> u32 {
        self.min_slot_overrides
            .get(&day_index)
            .copied()
            .unwrap_or(self.min_slots)
    }

    pub fn is_scheduled_on(&self, weekday: chrono::Weekday, is_holiday: bool) -> bool {
        if is_holiday && self.weekday_mask.is_holiday() {
            return true;
        }
        self.weekday_mask.contains_weekday(weekday)
    }

    pub fn blocks_next_day(&self, other_shift_index: usize) -> bool {
        self.blocked_next_day_shifts.contains(&other_shift_index)
    }
}

/// How an employee's skill weight is expected to evolve over the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillStrategy {
    /// Weight is fixed for the whole horizon.
    None,
    /// Weight changes at a fixed, pre-known point (`workload_change_event`).
    Static,
    /// Weight may change in response to external events during the search.
    Dynamic,
}

/// An employee's proficiency at one skill, plus the workload cap that
/// applies while working under that skill.
#[derive(Debug, Clone)]
pub struct SkillAssignment {
    pub weight: SkillWeight,
    pub strategy: SkillStrategy,
    /// Day index at which `weight` changes, for `Static`/`Dynamic` strategies.
    pub workload_change_event: Option<usize>,
    /// Fractional full-time-equivalent load under `Static` strategy; the cap
    /// is `168 * 60 * static_load_factor` minutes per week-length horizon.
    pub static_load_factor: f64,
    /// Hours/horizon load under `Dynamic` strategy; the cap is
    /// `dynamic_load_hours * 60` minutes.
    pub dynamic_load_hours: f64,
    /// Minutes of overtime tolerated before `EmploymentMaxDuration` escalates
    /// from a hard penalty to a strict one.
    pub overtime_allowance_minutes: u32,
}

impl SkillAssignment {
    /// Workload cap in minutes implied by `strategy`.
    pub fn max_workload_minutes(&self) -> f64 {
        match self.strategy {
            SkillStrategy::None => f64::MAX,
            SkillStrategy::Static => 168.0 * 60.0 * self.static_load_factor,
            SkillStrategy::Dynamic => self.dynamic_load_hours * 60.0,
        }
    }
}

/// A per-day or per-shift request with a signed preference weight: positive
/// for "desired", negative for "undesired".
#[derive(Debug, Clone, Copy)]
pub struct SpecificRequest {
    pub day_index: usize,
    pub shift_index: Option<usize>,
    pub weight: i64,
}

/// One of an employee's three availability categories: ranges the employee
/// is unavailable for (paid or unpaid) or ranges they'd prefer to work.
#[derive(Debug, Clone, Default)]
pub struct Availability {
    pub ranges: RangeCollection,
    pub specific_requests: Vec<SpecificRequest>,
}

impl Availability {
    pub fn covers(&self, range: &Range) -> bool {
        self.ranges.covers(range)
    }

    pub fn overlaps(&self, range: &Range) -> bool {
        self.ranges.any_overlaps(range)
    }

    pub fn specific_weight_for(&self, day_index: usize, shift_index: usize) -> i64 {
        self.specific_requests
            .iter()
            .filter(|r| r.day_index == day_index && r.shift_index.is_none_or(|s| s == shift_index))
            .map(|r| r.weight)
            .sum()
    }
}

/// Horizon-wide limits on an employee's work pattern.
#[derive(Debug, Clone, Copy)]
pub struct GeneralConstraints {
    pub min_consecutive_shifts: u32,
    pub max_consecutive_shifts: u32,
    pub min_consecutive_days_off: u32,
    pub max_working_weekends: u32,
    /// Cap on cumulative worked minutes within one unbroken chain of shifts
    /// (a chain continues across a break shorter than the shift's
    /// `consecutive_rest_minutes`). `u32::MAX` means unconstrained.
    pub max_cumulative_fatigue_minutes: u32,
}

/// A staff member: skills, availability, and horizon-wide work-pattern
/// limits.
#[derive(Debug, Clone)]
pub struct Employee {
    pub index: usize,
    pub name: String,
    pub skills: HashMap<usize, SkillAssignment>,
    pub paid_unavailable: Availability,
    pub unpaid_unavailable: Availability,
    pub desired: Availability,
    pub general: GeneralConstraints,
}

impl Employee {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            skills: HashMap::new(),
            paid_unavailable: Availability::default(),
            unpaid_unavailable: Availability::default(),
            desired: Availability::default(),
            general: GeneralConstraints {
                min_consecutive_shifts: 0,
                max_consecutive_shifts: u32::MAX,
                min_consecutive_days_off: 0,
                max_working_weekends: u32::MAX,
                max_cumulative_fatigue_minutes: u32::MAX,
            },
        }
    }

    pub fn with_skill(mut self, skill_index: usize, weight: SkillWeight) -> Self {
        self.skills.insert(
            skill_index,
            SkillAssignment {
                weight,
                strategy: SkillStrategy::None,
                workload_change_event: None,
                static_load_factor: 1.0,
                dynamic_load_hours: 0.0,
                overtime_allowance_minutes: 0,
            },
        );
        self
    }

    pub fn skill_weight(&self, skill_index: usize) -> Option<SkillWeight> {
        self.skills.get(&skill_index).map(|s| s.weight)
    }

    pub fn has_skill_at_least(&self, skill_index: usize, min_weight: SkillWeight) -> bool {
        self.skill_weight(skill_index).is_some_and(|w| w >= min_weight)
    }
}

/// One calendar day of the planning horizon.
#[derive(Debug, Clone, Copy)]
pub struct Day {
    pub index: usize,
    pub range: Range,
    pub weekday: chrono::Weekday,
}

impl Day {
    pub fn new(index: usize, range: Range) -> Self {
        let weekday = range.start.day_of_week();
        Self {
            index,
            range,
            weekday,
        }
    }

    pub fn start(&self) -> Instant {
        self.range.start
    }
}

/// A named competency shifts can require and employees can hold.
#[derive(Debug, Clone)]
pub struct Skill {
    pub index: usize,
    pub name: String,
}

impl Skill {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}
