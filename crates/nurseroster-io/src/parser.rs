//! Line-oriented instance text parser: `SECTION_<NAME>` blocks of
//! comma-separated rows, blank lines and `#`-comments ignored. Parsing is
//! all-or-nothing — the first malformed row aborts the whole parse.

use std::collections::HashMap;

use chrono::NaiveDate;
use chrono_tz::UTC;
use nurseroster_core::domain::{Day, Employee, GeneralConstraints, Shift, SkillStrategy, Skill, SpecificRequest, WeekdayMask};
use nurseroster_core::time::{DailyInterval, Instant};
use nurseroster_core::{Axis, Size};

use crate::error::{IoFormatError, Result};

/// A day index on which an employee is off, or a day/shift preference
/// request, parsed straight from its section but not yet resolved against
/// the shift/skill name tables.
#[derive(Debug, Clone)]
struct RequestRow {
    staff_id: String,
    day_index: usize,
    shift_id: String,
    weight: i64,
}

#[derive(Debug, Clone)]
struct ShiftRow {
    id: String,
    duration_minutes: u32,
    blocked_next_day: Vec<String>,
}

#[derive(Debug, Clone)]
struct StaffRow {
    id: String,
    skills: Vec<(String, u32)>,
    max_total_minutes: u32,
    min_total_minutes: u32,
    max_consec_shifts: u32,
    min_consec_shifts: u32,
    min_consec_days_off: u32,
    max_working_weekends: u32,
}

#[derive(Debug, Clone)]
struct CoverRow {
    day_index: usize,
    shift_id: String,
    required: u32,
    under_weight: i64,
    over_weight: i64,
}

/// The instance as parsed, before its string IDs are resolved into axis
/// indices by [`ParsedInstance::build`].
#[derive(Debug, Clone, Default)]
pub struct ParsedInstance {
    horizon_days: usize,
    shifts: Vec<ShiftRow>,
    staff: Vec<StaffRow>,
    days_off: Vec<(String, usize)>,
    shift_on_requests: Vec<RequestRow>,
    shift_off_requests: Vec<RequestRow>,
    cover: Vec<CoverRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Horizon,
    Shifts,
    Staff,
    DaysOff,
    ShiftOnRequests,
    ShiftOffRequests,
    Cover,
}

fn section_of(name: &str) -> Option<Section> {
    match name {
        "SECTION_HORIZON" => Some(Section::Horizon),
        "SECTION_SHIFTS" => Some(Section::Shifts),
        "SECTION_STAFF" => Some(Section::Staff),
        "SECTION_DAYS_OFF" => Some(Section::DaysOff),
        "SECTION_SHIFT_ON_REQUESTS" => Some(Section::ShiftOnRequests),
        "SECTION_SHIFT_OFF_REQUESTS" => Some(Section::ShiftOffRequests),
        "SECTION_COVER" => Some(Section::Cover),
        _ => None,
    }
}

fn field(row: &[&str], index: usize, line: usize, name: &str) -> Result<String> {
    row.get(index)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| IoFormatError::at(line, format!("missing field {name}")))
}

fn parse_int<T: std::str::FromStr>(value: &str, line: usize, name: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| IoFormatError::at(line, format!("{name} is not a valid integer: {value:?}")))
}

/// Parses the full instance text format, returning the first line/reason
/// pair on any malformed row.
pub fn parse(text: &str) -> Result<ParsedInstance> {
    let mut instance = ParsedInstance::default();
    let mut current: Option<Section> = None;

    for (zero_based, raw_line) in text.lines().enumerate() {
        let line = zero_based + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.starts_with("SECTION_") {
            current = Some(section_of(trimmed).ok_or_else(|| IoFormatError::at(line, format!("unknown section {trimmed:?}")))?);
            continue;
        }
        let section = current.ok_or_else(|| IoFormatError::at(line, "row appears before any SECTION_ header"))?;
        let cells: Vec<&str> = trimmed.split(',').map(|s| s.trim()).collect();

        match section {
            Section::Horizon => {
                instance.horizon_days = parse_int(&field(&cells, 0, line, "days")?, line, "days")?;
            }
            Section::Shifts => {
                let id = field(&cells, 0, line, "shiftID")?;
                let duration_minutes = parse_int(&field(&cells, 1, line, "durationMinutes")?, line, "durationMinutes")?;
                let blocked_next_day = cells
                    .get(2)
                    .map(|s| s.split('|').filter(|s| !s.is_empty()).map(str::to_string).collect())
                    .unwrap_or_default();
                instance.shifts.push(ShiftRow { id, duration_minutes, blocked_next_day });
            }
            Section::Staff => {
                let id = field(&cells, 0, line, "id")?;
                let skills = field(&cells, 1, line, "skill-entries")?
                    .split('|')
                    .filter(|s| !s.is_empty())
                    .map(|entry| {
                        let (name, weight) = entry
                            .split_once('=')
                            .ok_or_else(|| IoFormatError::at(line, format!("malformed skill entry {entry:?}")))?;
                        Ok((name.to_string(), parse_int(weight, line, "skill weight")?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                instance.staff.push(StaffRow {
                    id,
                    skills,
                    max_total_minutes: parse_int(&field(&cells, 2, line, "maxTotalMinutes")?, line, "maxTotalMinutes")?,
                    min_total_minutes: parse_int(&field(&cells, 3, line, "minTotalMinutes")?, line, "minTotalMinutes")?,
                    max_consec_shifts: parse_int(&field(&cells, 4, line, "maxConsecShifts")?, line, "maxConsecShifts")?,
                    min_consec_shifts: parse_int(&field(&cells, 5, line, "minConsecShifts")?, line, "minConsecShifts")?,
                    min_consec_days_off: parse_int(&field(&cells, 6, line, "minConsecDaysOff")?, line, "minConsecDaysOff")?,
                    max_working_weekends: parse_int(&field(&cells, 7, line, "maxWorkingWeekends")?, line, "maxWorkingWeekends")?,
                });
            }
            Section::DaysOff => {
                let staff_id = field(&cells, 0, line, "staffID")?;
                for cell in &cells[1..] {
                    instance.days_off.push((staff_id.clone(), parse_int(cell, line, "dayIndex")?));
                }
            }
            Section::ShiftOnRequests | Section::ShiftOffRequests => {
                let request = RequestRow {
                    staff_id: field(&cells, 0, line, "staffID")?,
                    day_index: parse_int(&field(&cells, 1, line, "dayIndex")?, line, "dayIndex")?,
                    shift_id: field(&cells, 2, line, "shiftID")?,
                    weight: parse_int(&field(&cells, 3, line, "weight")?, line, "weight")?,
                };
                if section == Section::ShiftOnRequests {
                    instance.shift_on_requests.push(request);
                } else {
                    instance.shift_off_requests.push(request);
                }
            }
            Section::Cover => {
                instance.cover.push(CoverRow {
                    day_index: parse_int(&field(&cells, 0, line, "dayIndex")?, line, "dayIndex")?,
                    shift_id: field(&cells, 1, line, "shiftID")?,
                    required: parse_int(&field(&cells, 2, line, "required")?, line, "required")?,
                    under_weight: parse_int(&field(&cells, 3, line, "underWt")?, line, "underWt")?,
                    over_weight: parse_int(&field(&cells, 4, line, "overWt")?, line, "overWt")?,
                });
            }
        }
    }

    if instance.horizon_days == 0 {
        return Err(IoFormatError::at(0, "SECTION_HORIZON missing or zero"));
    }
    Ok(instance)
}

/// The axis-resolved form of a parsed instance, ready to seed a `State`.
pub struct BuiltInstance {
    pub size: Size,
    pub shifts: Axis<Shift>,
    pub employees: Axis<Employee>,
    pub days: Axis<Day>,
    pub skills: Axis<Skill>,
}

impl ParsedInstance {
    /// Resolves every string ID into an axis index and builds the four
    /// domain axes. Each shift row allocates one distinct skill named
    /// identically to the shift, per the format's convention.
    pub fn build(&self) -> Result<BuiltInstance> {
        let shift_index: HashMap<&str, usize> = self.shifts.iter().enumerate().map(|(i, s)| (s.id.as_str(), i)).collect();
        let staff_index: HashMap<&str, usize> = self.staff.iter().enumerate().map(|(i, s)| (s.id.as_str(), i)).collect();
        let skill_names: Vec<String> = self.shifts.iter().map(|s| s.id.clone()).collect();
        let skill_index: HashMap<&str, usize> = skill_names.iter().enumerate().map(|(i, name)| (name.as_str(), i)).collect();

        let days: Vec<Day> = (0..self.horizon_days)
            .map(|day_index| {
                let date = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap() + chrono::Duration::days(day_index as i64);
                let start = Instant::from_naive(UTC, date, chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap())
                    .map_err(|e| IoFormatError::at(0, format!("failed to anchor day {day_index}: {e}")))?;
                let end = start.plus(chrono::Duration::days(1));
                Ok(Day::new(day_index, nurseroster_core::time::Range::new(start, end)))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut shifts = Vec::with_capacity(self.shifts.len());
        for (index, row) in self.shifts.iter().enumerate() {
            let blocked_next_day_shifts = row
                .blocked_next_day
                .iter()
                .map(|id| {
                    shift_index
                        .get(id.as_str())
                        .copied()
                        .ok_or_else(|| IoFormatError::at(0, format!("unknown blocked shift id {id:?}")))
                })
                .collect::<Result<Vec<_>>>()?;
            let mut required_all_skills = HashMap::new();
            required_all_skills.insert(index, 1u32);

            let start_time = chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap();
            let end_minutes = row.duration_minutes % (24 * 60);
            let end_time = start_time + chrono::Duration::minutes(end_minutes as i64);

            shifts.push(Shift {
                index,
                name: row.id.clone(),
                weekday_mask: WeekdayMask::new(0b0111_1111).with_holiday(false),
                interval: DailyInterval::new(start_time, end_time),
                default_slot_count: 0,
                slot_overrides: HashMap::new(),
                min_slot_overrides: HashMap::new(),
                min_slots: 0,
                max_slots: u32::MAX,
                rest_minutes_before: 0,
                rest_minutes_after: 0,
                consecutive_rest_minutes: row.duration_minutes,
                required_all_skills,
                required_one_skills: HashMap::new(),
                blocked_next_day_shifts,
            });
        }

        for row in &self.cover {
            let shift_pos = *shift_index
                .get(row.shift_id.as_str())
                .ok_or_else(|| IoFormatError::at(0, format!("unknown cover shift id {:?}", row.shift_id)))?;
            let shift = &mut shifts[shift_pos];
            shift.slot_overrides.insert(row.day_index, row.required);
            shift.min_slot_overrides.insert(row.day_index, row.required);
            shift.max_slots = row.required;
            let _ = (row.under_weight, row.over_weight);
        }
        for shift in &mut shifts {
            if shift.slot_overrides.is_empty() {
                shift.default_slot_count = shift.min_slots;
            } else {
                shift.default_slot_count = *shift.slot_overrides.values().next().unwrap_or(&0);
            }
        }

        let mut employees = Vec::with_capacity(self.staff.len());
        for (index, row) in self.staff.iter().enumerate() {
            let mut employee = Employee::new(index, row.id.clone());
            for (skill_name, weight) in &row.skills {
                let skill_pos = *skill_index
                    .get(skill_name.as_str())
                    .ok_or_else(|| IoFormatError::at(0, format!("unknown skill {skill_name:?} for staff {:?}", row.id)))?;
                employee = employee.with_skill(skill_pos, *weight);
            }
            employee.general = GeneralConstraints {
                min_consecutive_shifts: row.min_consec_shifts,
                max_consecutive_shifts: row.max_consec_shifts,
                min_consecutive_days_off: row.min_consec_days_off,
                max_working_weekends: row.max_working_weekends,
                max_cumulative_fatigue_minutes: row.max_total_minutes,
            };
            for skill in employee.skills.values_mut() {
                skill.strategy = SkillStrategy::None;
            }
            let _ = row.min_total_minutes;
            employees.push(employee);
        }

        for (staff_id, day_index) in &self.days_off {
            let emp = employees
                .get_mut(*staff_index.get(staff_id.as_str()).ok_or_else(|| IoFormatError::at(0, format!("unknown staff id {staff_id:?}")))?)
                .expect("index resolved from staff_index is always in range");
            let day = &days[*day_index];
            emp.paid_unavailable.ranges.insert(day.range);
        }

        for (requests, sign) in [(&self.shift_on_requests, 1i64), (&self.shift_off_requests, -1i64)] {
            for request in requests {
                let emp_pos = *staff_index
                    .get(request.staff_id.as_str())
                    .ok_or_else(|| IoFormatError::at(0, format!("unknown staff id {:?}", request.staff_id)))?;
                let shift_pos = *shift_index
                    .get(request.shift_id.as_str())
                    .ok_or_else(|| IoFormatError::at(0, format!("unknown shift id {:?}", request.shift_id)))?;
                employees[emp_pos].desired.specific_requests.push(SpecificRequest {
                    day_index: request.day_index,
                    shift_index: Some(shift_pos),
                    weight: sign * request.weight,
                });
            }
        }

        let skills: Vec<Skill> = skill_names.into_iter().enumerate().map(|(i, name)| Skill::new(i, name)).collect();

        let size = Size::new(shifts.len(), employees.len(), days.len(), skills.len())
            .map_err(|e| IoFormatError::at(0, format!("invalid instance geometry: {e}")))?;

        Ok(BuiltInstance {
            size,
            shifts: Axis::new(shifts),
            employees: Axis::new(employees),
            days: Axis::new(days),
            skills: Axis::new(skills),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
SECTION_HORIZON
3
SECTION_SHIFTS
D, 480
N, 480, D
SECTION_STAFF
alice, D=1|N=1, 2400, 0, 5, 1, 2, 1
SECTION_DAYS_OFF
alice, 2
SECTION_SHIFT_ON_REQUESTS
alice, 0, D, 3
SECTION_SHIFT_OFF_REQUESTS
alice, 1, N, 2
SECTION_COVER
0, D, 1, 10, 5
1, D, 1, 10, 5
";

    #[test]
    fn parses_every_section_of_the_sample() {
        let parsed = parse(SAMPLE).unwrap();
        assert_eq!(parsed.horizon_days, 3);
        assert_eq!(parsed.shifts.len(), 2);
        assert_eq!(parsed.staff.len(), 1);
        assert_eq!(parsed.days_off.len(), 1);
        assert_eq!(parsed.shift_on_requests.len(), 1);
        assert_eq!(parsed.shift_off_requests.len(), 1);
        assert_eq!(parsed.cover.len(), 2);
    }

    #[test]
    fn builds_consistent_axes() {
        let built = parse(SAMPLE).unwrap().build().unwrap();
        assert_eq!(built.size.x, 2);
        assert_eq!(built.size.y, 1);
        assert_eq!(built.size.z, 3);
        assert_eq!(built.size.w, 2);
        assert_eq!(built.shifts.as_slice()[1].blocked_next_day_shifts, vec![0]);
        assert!(built.employees.as_slice()[0].has_skill_at_least(0, 1));
    }

    #[test]
    fn unknown_section_name_is_rejected() {
        let err = parse("SECTION_BOGUS\n1\n").unwrap_err();
        assert!(matches!(err, IoFormatError::ParseError { line: 1, .. }));
    }

    #[test]
    fn row_before_any_section_is_rejected() {
        let err = parse("1,2,3\n").unwrap_err();
        assert!(matches!(err, IoFormatError::ParseError { line: 1, .. }));
    }

    #[test]
    fn missing_horizon_is_rejected() {
        let err = parse("SECTION_SHIFTS\nD, 480\n").unwrap_err();
        assert!(matches!(err, IoFormatError::ParseError { .. }));
    }

    #[test]
    fn cover_minimum_stays_per_day_instead_of_flattening() {
        let text = "\
SECTION_HORIZON
2
SECTION_SHIFTS
D, 480
SECTION_STAFF
alice, D=1, 2400, 0, 5, 1, 2, 1
SECTION_COVER
0, D, 3, 10, 5
1, D, 1, 10, 5
";
        let built = parse(text).unwrap().build().unwrap();
        let shift = &built.shifts.as_slice()[0];
        assert_eq!(shift.min_slot_count_on(0), 3);
        assert_eq!(shift.min_slot_count_on(1), 1);
    }
}
