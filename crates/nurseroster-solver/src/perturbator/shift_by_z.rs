//! Slides a contiguous run of one employee's working days forward or
//! backward along the day axis.

use nurseroster_core::State;
use nurseroster_scoring::{ConstraintScore, Violation};
use rand::Rng;

use super::Perturbator;

/// Captures the (x, w) bit-pattern for each day in a chain before mutating
/// anything, since source and destination ranges can overlap once the
/// chain slides by less than its own length.
#[derive(Debug, Default)]
pub struct ShiftByZPerturbator {
    plan: Option<Plan>,
}

#[derive(Debug, Clone)]
struct Plan {
    y: usize,
    z_start: usize,
    chain_len: usize,
    offset: isize,
    captured: Vec<Vec<bool>>,
}

impl ShiftByZPerturbator {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&mut self, state: &mut State<'_>, forward: bool) {
        let Some(plan) = &mut self.plan else { return };
        let size = state.size();

        if forward {
            plan.captured = (0..plan.chain_len)
                .map(|dz| {
                    let z = plan.z_start + dz;
                    (0..size.x * size.w)
                        .map(|i| state.get(i / size.w, plan.y, z, i % size.w))
                        .collect()
                })
                .collect();
            for dz in 0..plan.chain_len {
                let z = plan.z_start + dz;
                for x in 0..size.x {
                    for w in 0..size.w {
                        state.clear(x, plan.y, z, w);
                    }
                }
            }
            for dz in 0..plan.chain_len {
                let dest = plan.z_start as isize + dz as isize + plan.offset;
                if dest < 0 || dest as usize >= size.z {
                    continue;
                }
                let dest = dest as usize;
                for i in 0..size.x * size.w {
                    state.assign(i / size.w, plan.y, dest, i % size.w, plan.captured[dz][i]);
                }
            }
        } else {
            // Revert: apply the inverse shift using the captured pattern —
            // clear wherever the forward pass wrote, then restore the
            // original days verbatim.
            for dz in 0..plan.chain_len {
                let dest = plan.z_start as isize + dz as isize + plan.offset;
                if dest < 0 || dest as usize >= size.z {
                    continue;
                }
                let dest = dest as usize;
                for x in 0..size.x {
                    for w in 0..size.w {
                        state.clear(x, plan.y, dest, w);
                    }
                }
            }
            for dz in 0..plan.chain_len {
                let z = plan.z_start + dz;
                for i in 0..size.x * size.w {
                    state.assign(i / size.w, plan.y, z, i % size.w, plan.captured[dz][i]);
                }
            }
        }
    }
}

impl Perturbator for ShiftByZPerturbator {
    fn configure(&mut self, _violation: Option<&Violation>, state: &State<'_>) {
        let size = state.size();
        let mut rng = rand::rng();
        let y = rng.random_range(0..size.y);

        // Find the employee's contiguous "has any assignment" runs and pick
        // one at random; bail out if the employee has no assignments at all.
        let mut runs = Vec::new();
        let mut run_start = None;
        for z in 0..size.z {
            let has_work = (0..size.x).any(|x| state.get_xyz_any(x, y, z));
            match (has_work, run_start) {
                (true, None) => run_start = Some(z),
                (false, Some(start)) => {
                    runs.push((start, z - start));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            runs.push((start, size.z - start));
        }
        if runs.is_empty() {
            self.plan = None;
            return;
        }
        let (z_start, chain_len) = runs[rng.random_range(0..runs.len())];

        let max_forward = size.z.saturating_sub(z_start + chain_len);
        let max_backward = z_start;
        if max_forward == 0 && max_backward == 0 {
            self.plan = None;
            return;
        }
        let offset = if max_backward == 0 {
            rng.random_range(1..=max_forward) as isize
        } else if max_forward == 0 {
            -(rng.random_range(1..=max_backward) as isize)
        } else if rng.random_bool(0.5) {
            rng.random_range(1..=max_forward) as isize
        } else {
            -(rng.random_range(1..=max_backward) as isize)
        };

        self.plan = Some(Plan {
            y,
            z_start,
            chain_len,
            offset,
            captured: Vec::new(),
        });
    }

    fn modify(&mut self, state: &mut State<'_>) {
        self.apply(state, true);
    }

    fn revert(&mut self, state: &mut State<'_>) {
        self.apply(state, false);
    }

    fn is_identity(&self) -> bool {
        self.plan.is_none()
    }

    fn configure_if_applicable(&mut self, _scores: &[(&str, ConstraintScore)], state: &State<'_>) -> bool {
        self.configure(None, state);
        !self.is_identity()
    }
}
