//! The dense 4-D assignment tensor and the axes it's interpreted against.

use crate::bits::BitStore;
use crate::domain::{Day, Employee, Shift, Skill};
use crate::size::{Axis, Size};

/// The current (or a snapshotted) assignment: a bit-vector of shape
/// (X, Y, Z, W) plus borrowed references to the axes that give the bits
/// meaning.
///
/// Bit `(x, y, z, w)` set means "employee `y`, on day `z`, covers shift `x`
/// using skill `w`". `State` owns its `BitStore`; cloning `State` deep-copies
/// the bits, which is required for "keep the best state found so far"
/// bookkeeping. Axes are borrowed — many states can share one solver
/// configuration's axes without duplicating entity data.
#[derive(Clone)]
pub struct State<'a> {
    size: Size,
    bits: BitStore,
    shifts: &'a Axis<Shift>,
    employees: &'a Axis<Employee>,
    days: &'a Axis<Day>,
    skills: &'a Axis<Skill>,
}

impl<'a> State<'a> {
    pub fn new(
        size: Size,
        shifts: &'a Axis<Shift>,
        employees: &'a Axis<Employee>,
        days: &'a Axis<Day>,
        skills: &'a Axis<Skill>,
    ) -> Self {
        debug_assert_eq!(shifts.len(), size.x);
        debug_assert_eq!(employees.len(), size.y);
        debug_assert_eq!(days.len(), size.z);
        debug_assert_eq!(skills.len(), size.w);
        Self {
            size,
            bits: BitStore::new(size.volume()),
            shifts,
            employees,
            days,
            skills,
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn shifts(&self) -> &'a Axis<Shift> {
        self.shifts
    }

    pub fn employees(&self) -> &'a Axis<Employee> {
        self.employees
    }

    pub fn days(&self) -> &'a Axis<Day> {
        self.days
    }

    pub fn skills(&self) -> &'a Axis<Skill> {
        self.skills
    }

    pub fn bits(&self) -> &BitStore {
        &self.bits
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize, w: usize) -> bool {
        self.size.debug_check(x, y, z, w);
        self.bits.get(self.size.index(x, y, z, w)) == 1
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, w: usize) {
        self.size.debug_check(x, y, z, w);
        let i = self.size.index(x, y, z, w);
        self.bits.set(i);
    }

    #[inline]
    pub fn clear(&mut self, x: usize, y: usize, z: usize, w: usize) {
        self.size.debug_check(x, y, z, w);
        let i = self.size.index(x, y, z, w);
        self.bits.clear(i);
    }

    #[inline]
    pub fn assign(&mut self, x: usize, y: usize, z: usize, w: usize, value: bool) {
        if value {
            self.set(x, y, z, w);
        } else {
            self.clear(x, y, z, w);
        }
    }

    /// True iff employee `y` covers shift `x` on day `z` with any skill.
    pub fn get_xyz_any(&self, x: usize, y: usize, z: usize) -> bool {
        self.bits.test(self.size.offset3(x, y, z), self.size.w)
    }

    pub fn set_all(&mut self) {
        self.bits.set_all();
    }

    pub fn clear_all(&mut self) {
        self.bits.clear_all();
    }

    /// Fills the tensor with independent Bernoulli(p) draws.
    pub fn random<R: rand::Rng + ?Sized>(&mut self, p: f64, rng: &mut R) {
        self.bits.random(p, rng);
    }

    /// Count of set bits across the whole tensor.
    pub fn count(&self) -> usize {
        self.bits.count()
    }

    /// Deep-copies `self`'s bits into `dst`, which must share this state's
    /// size and axes.
    pub fn copy_bits_into(&self, dst: &mut State<'a>) {
        debug_assert_eq!(self.size, dst.size);
        dst.bits = self.bits.clone();
    }

    /// Extracts the (x, w) plane for a fixed (y, z) into `dst`, row-major
    /// over x (stride W).
    pub fn get_plane_xw(&self, dst: &mut BitStore, y: usize, z: usize) {
        debug_assert_eq!(dst.len(), self.size.x * self.size.w);
        for x in 0..self.size.x {
            for w in 0..self.size.w {
                dst.assign((x * self.size.w + w) as usize, self.get(x, y, z, w) as u64);
            }
        }
    }

    /// Extracts the (y, w) plane for a fixed (x, z) into `dst`, row-major
    /// over y (stride W).
    pub fn get_plane_yw(&self, dst: &mut BitStore, x: usize, z: usize) {
        debug_assert_eq!(dst.len(), self.size.y * self.size.w);
        for y in 0..self.size.y {
            for w in 0..self.size.w {
                dst.assign(y * self.size.w + w, self.get(x, y, z, w) as u64);
            }
        }
    }

    /// Extracts the (x, y) plane for a fixed (z, w) into `dst`, row-major
    /// over x (stride Y).
    pub fn get_plane_xy(&self, dst: &mut BitStore, z: usize, w: usize) {
        debug_assert_eq!(dst.len(), self.size.x * self.size.y);
        for x in 0..self.size.x {
            for y in 0..self.size.y {
                dst.assign(x * self.size.y + y, self.get(x, y, z, w) as u64);
            }
        }
    }

    /// Writes a (y, w) plane (row-major over y, stride W) into the tensor at
    /// fixed (x, z), overwriting whatever bits were there.
    pub fn assign_plane_yw(&mut self, src: &BitStore, x: usize, z: usize) {
        debug_assert_eq!(src.len(), self.size.y * self.size.w);
        for y in 0..self.size.y {
            for w in 0..self.size.w {
                self.assign(x, y, z, w, src.get(y * self.size.w + w) == 1);
            }
        }
    }

    /// Clears every bit of the (y, w) plane at fixed (x, z).
    pub fn clear_plane_yw(&mut self, x: usize, z: usize) {
        for y in 0..self.size.y {
            for w in 0..self.size.w {
                self.clear(x, y, z, w);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeneralConstraints, WeekdayMask};
    use crate::time::{DailyInterval, Instant, Range};
    use chrono::NaiveTime;
    use chrono_tz::Europe::Berlin;
    use std::collections::HashMap;

    fn fixture_axes() -> (Axis<Shift>, Axis<Employee>, Axis<Day>, Axis<Skill>) {
        let shift = Shift {
            index: 0,
            name: "Day".into(),
            weekday_mask: WeekdayMask::new(0b0111_1111),
            interval: DailyInterval::new(
                NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            ),
            default_slot_count: 1,
            slot_overrides: HashMap::new(),
            min_slots: 1,
            max_slots: 1,
            min_slot_overrides: HashMap::new(),
            rest_minutes_before: 0,
            rest_minutes_after: 0,
            consecutive_rest_minutes: 0,
            required_all_skills: HashMap::new(),
            required_one_skills: HashMap::new(),
            blocked_next_day_shifts: Vec::new(),
        };
        let employee = Employee {
            index: 0,
            name: "Alice".into(),
            skills: HashMap::new(),
            paid_unavailable: Default::default(),
            unpaid_unavailable: Default::default(),
            desired: Default::default(),
            general: GeneralConstraints {
                min_consecutive_shifts: 0,
                max_consecutive_shifts: u32::MAX,
                min_consecutive_days_off: 0,
                max_working_weekends: u32::MAX,
                max_cumulative_fatigue_minutes: u32::MAX,
            },
        };
        let start = Instant::from_naive(
            Berlin,
            chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        )
        .unwrap();
        let end = Instant::from_naive(
            Berlin,
            chrono::NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        )
        .unwrap();
        let day = Day::new(0, Range::new(start, end));
        let skill = Skill::new(0, "Nursing");

        (
            Axis::new(vec![shift]),
            Axis::new(vec![employee]),
            Axis::new(vec![day]),
            Axis::new(vec![skill]),
        )
    }

    #[test]
    fn set_get_clear_roundtrip() {
        let (shifts, employees, days, skills) = fixture_axes();
        let size = Size::new(1, 1, 1, 1).unwrap();
        let mut state = State::new(size, &shifts, &employees, &days, &skills);
        assert!(!state.get(0, 0, 0, 0));
        state.set(0, 0, 0, 0);
        assert!(state.get(0, 0, 0, 0));
        assert!(state.get_xyz_any(0, 0, 0));
        state.clear(0, 0, 0, 0);
        assert!(!state.get(0, 0, 0, 0));
    }

    #[test]
    fn clone_deep_copies_bits() {
        let (shifts, employees, days, skills) = fixture_axes();
        let size = Size::new(1, 1, 1, 1).unwrap();
        let mut state = State::new(size, &shifts, &employees, &days, &skills);
        state.set(0, 0, 0, 0);
        let mut snapshot = state.clone();
        state.clear(0, 0, 0, 0);
        assert!(!state.get(0, 0, 0, 0));
        assert!(snapshot.get(0, 0, 0, 0));
        snapshot.clear(0, 0, 0, 0);
        assert!(!state.get(0, 0, 0, 0));
    }

    #[test]
    fn copy_bits_into_overwrites_destination() {
        let (shifts, employees, days, skills) = fixture_axes();
        let size = Size::new(1, 1, 1, 1).unwrap();
        let mut a = State::new(size, &shifts, &employees, &days, &skills);
        let mut b = State::new(size, &shifts, &employees, &days, &skills);
        a.set(0, 0, 0, 0);
        a.copy_bits_into(&mut b);
        assert!(b.get(0, 0, 0, 0));
    }

    #[test]
    fn plane_yw_roundtrips_through_assign_and_extract() {
        let (shifts, employees, days, skills) = fixture_axes();
        let size = Size::new(1, 1, 1, 1).unwrap();
        let mut state = State::new(size, &shifts, &employees, &days, &skills);
        state.set(0, 0, 0, 0);

        let mut plane = BitStore::new(size.y * size.w);
        state.get_plane_yw(&mut plane, 0, 0);
        assert_eq!(plane.get(0), 1);

        state.clear_plane_yw(0, 0);
        assert!(!state.get(0, 0, 0, 0));

        state.assign_plane_yw(&plane, 0, 0);
        assert!(state.get(0, 0, 0, 0));
    }
}
