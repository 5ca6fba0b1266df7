//! Exchange moves: swap two equal-shaped slices of the tensor against each
//! other rather than flipping bits in isolation, so coverage totals stay
//! put while who-covers-what shuffles.

use nurseroster_core::State;
use nurseroster_scoring::{ConstraintScore, Violation};
use rand::Rng;

use super::Perturbator;

/// Swaps two employees' assignments over a contiguous window of days, for
/// every shift and skill. A no-op if the two employees happen to agree on
/// every swapped bit, but still bookkept so `revert` is always safe.
#[derive(Debug, Default)]
pub struct HorizontalExchangePerturbator {
    plan: Option<(usize, usize, usize, usize)>,
}

impl HorizontalExchangePerturbator {
    pub fn new() -> Self {
        Self::default()
    }

    fn swap(&self, state: &mut State<'_>) {
        let Some((y1, y2, z_start, window)) = self.plan else { return };
        let size = state.size();
        for x in 0..size.x {
            for z in z_start..(z_start + window).min(size.z) {
                for w in 0..size.w {
                    let a = state.get(x, y1, z, w);
                    let b = state.get(x, y2, z, w);
                    if a != b {
                        state.assign(x, y1, z, w, b);
                        state.assign(x, y2, z, w, a);
                    }
                }
            }
        }
    }
}

impl Perturbator for HorizontalExchangePerturbator {
    fn configure(&mut self, _violation: Option<&Violation>, state: &State<'_>) {
        let size = state.size();
        if size.y < 2 {
            self.plan = None;
            return;
        }
        let mut rng = rand::rng();
        let y1 = rng.random_range(0..size.y);
        let mut y2 = rng.random_range(0..size.y - 1);
        if y2 >= y1 {
            y2 += 1;
        }
        let window = rng.random_range(1..=size.z).min(size.z);
        let z_start = if window >= size.z { 0 } else { rng.random_range(0..=size.z - window) };
        self.plan = Some((y1, y2, z_start, window));
    }

    fn modify(&mut self, state: &mut State<'_>) {
        self.swap(state);
    }

    fn revert(&mut self, state: &mut State<'_>) {
        // Swapping the same pair back restores the original arrangement.
        self.swap(state);
    }

    fn is_identity(&self) -> bool {
        self.plan.is_none()
    }

    fn configure_if_applicable(&mut self, _scores: &[(&str, ConstraintScore)], state: &State<'_>) -> bool {
        self.configure(None, state);
        !self.is_identity()
    }
}

/// Swaps one employee's assignments between two disjoint day windows — the
/// Z-axis dual of `HorizontalExchangePerturbator`: instead of exchanging two
/// employees' rows, it exchanges one employee's own schedule between two
/// points in time.
#[derive(Debug, Default)]
pub struct VerticalExchangePerturbator {
    plan: Option<(usize, usize, usize, usize)>,
}

impl VerticalExchangePerturbator {
    pub fn new() -> Self {
        Self::default()
    }

    fn swap(&self, state: &mut State<'_>) {
        let Some((y, z1, z2, window)) = self.plan else { return };
        let size = state.size();
        for dz in 0..window {
            let (za, zb) = (z1 + dz, z2 + dz);
            if za >= size.z || zb >= size.z {
                break;
            }
            for x in 0..size.x {
                for w in 0..size.w {
                    let a = state.get(x, y, za, w);
                    let b = state.get(x, y, zb, w);
                    if a != b {
                        state.assign(x, y, za, w, b);
                        state.assign(x, y, zb, w, a);
                    }
                }
            }
        }
    }
}

impl Perturbator for VerticalExchangePerturbator {
    fn configure(&mut self, _violation: Option<&Violation>, state: &State<'_>) {
        let size = state.size();
        if size.z < 2 {
            self.plan = None;
            return;
        }
        let mut rng = rand::rng();
        let y = rng.random_range(0..size.y);
        // Pick two disjoint halves of the day axis so the windows never
        // overlap, keeping the swap a plain pairwise exchange.
        let half = size.z / 2;
        if half == 0 {
            self.plan = None;
            return;
        }
        let second_half_len = size.z - half;
        let window = rng.random_range(1..=half.min(second_half_len));
        let z1 = rng.random_range(0..=half - window);
        let z2 = half + rng.random_range(0..=second_half_len - window);
        self.plan = Some((y, z1, z2, window));
    }

    fn modify(&mut self, state: &mut State<'_>) {
        self.swap(state);
    }

    fn revert(&mut self, state: &mut State<'_>) {
        self.swap(state);
    }

    fn is_identity(&self) -> bool {
        self.plan.is_none()
    }

    fn configure_if_applicable(&mut self, _scores: &[(&str, ConstraintScore)], state: &State<'_>) -> bool {
        self.configure(None, state);
        !self.is_identity()
    }
}
