//! StrictHardSoftScore — the three-level lexicographic score every
//! constraint in this crate emits into.

use std::cmp::Ordering;
use std::fmt;

use super::traits::Score;
use super::ScoreLevel;

/// A score with strict, hard, and soft levels, compared lexicographically:
/// strict dominates hard dominates soft.
///
/// "Strict" constraints cover structural validity that a well-formed
/// instance should never violate (e.g. assigning an employee to a shift
/// they cannot physically reach); "hard" covers rostering rules that may be
/// broken during search but must reach zero for feasibility; "soft" covers
/// optimization preferences.
///
/// ```
/// use nurseroster_core::score::StrictHardSoftScore;
///
/// let a = StrictHardSoftScore::of(0, -2, -100);
/// let b = StrictHardSoftScore::of(0, -1, -200);
/// assert!(b > a);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StrictHardSoftScore {
    strict: i64,
    hard: i64,
    soft: i64,
}

impl StrictHardSoftScore {
    pub const ZERO: StrictHardSoftScore = StrictHardSoftScore {
        strict: 0,
        hard: 0,
        soft: 0,
    };

    pub const ONE_STRICT: StrictHardSoftScore = StrictHardSoftScore {
        strict: 1,
        hard: 0,
        soft: 0,
    };

    pub const ONE_HARD: StrictHardSoftScore = StrictHardSoftScore {
        strict: 0,
        hard: 1,
        soft: 0,
    };

    pub const ONE_SOFT: StrictHardSoftScore = StrictHardSoftScore {
        strict: 0,
        hard: 0,
        soft: 1,
    };

    #[inline]
    pub const fn of(strict: i64, hard: i64, soft: i64) -> Self {
        StrictHardSoftScore { strict, hard, soft }
    }

    #[inline]
    pub const fn of_strict(strict: i64) -> Self {
        StrictHardSoftScore {
            strict,
            hard: 0,
            soft: 0,
        }
    }

    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        StrictHardSoftScore {
            strict: 0,
            hard,
            soft: 0,
        }
    }

    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        StrictHardSoftScore {
            strict: 0,
            hard: 0,
            soft,
        }
    }

    #[inline]
    pub const fn strict(&self) -> i64 {
        self.strict
    }

    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// True iff every level is non-negative.
    pub const fn is_zero_or_better(&self) -> bool {
        self.strict >= 0 && self.hard >= 0 && self.soft >= 0
    }
}

impl Score for StrictHardSoftScore {
    #[inline]
    fn is_feasible(&self) -> bool {
        self.strict >= 0 && self.hard >= 0
    }

    #[inline]
    fn zero() -> Self {
        StrictHardSoftScore::ZERO
    }

    #[inline]
    fn levels_count() -> usize {
        3
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.strict, self.hard, self.soft]
    }

    fn from_level_numbers(levels: &[i64]) -> Self {
        assert_eq!(
            levels.len(),
            3,
            "StrictHardSoftScore requires exactly 3 levels"
        );
        StrictHardSoftScore::of(levels[0], levels[1], levels[2])
    }

    impl_score_scale!(StrictHardSoftScore { strict, hard, soft } => of);

    fn level_label(index: usize) -> ScoreLevel {
        match index {
            0 => ScoreLevel::Strict,
            1 => ScoreLevel::Hard,
            2 => ScoreLevel::Soft,
            _ => panic!("StrictHardSoftScore has 3 levels, got index {index}"),
        }
    }
}

impl Ord for StrictHardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.strict.cmp(&other.strict) {
            Ordering::Equal => match self.hard.cmp(&other.hard) {
                Ordering::Equal => self.soft.cmp(&other.soft),
                other => other,
            },
            other => other,
        }
    }
}

impl_score_ops!(StrictHardSoftScore { strict, hard, soft } => of);

impl fmt::Debug for StrictHardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StrictHardSoftScore({}, {}, {})",
            self.strict, self.hard, self.soft
        )
    }
}

impl fmt::Display for StrictHardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}strict/{}hard/{}soft",
            self.strict, self.hard, self.soft
        )
    }
}

impl_score_parse!(StrictHardSoftScore { strict => "strict", hard => "hard", soft => "soft" } => of);
