//! Core `Score` trait, shared across all score types this crate might ever
//! grow (today there's exactly one: [`super::StrictHardSoftScore`]).

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::ops::{Add, Neg, Sub};

use super::ScoreLevel;

/// A comparable, lexicographically-ordered measure of solution quality.
///
/// Levels are compared from index 0 (highest priority) downward; the first
/// unequal level decides the ordering.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// True iff this score is acceptable as a final solution (no constraint
    /// level above "soft" is negative).
    fn is_feasible(&self) -> bool;

    fn zero() -> Self;

    fn levels_count() -> usize;

    /// Level values from highest to lowest priority.
    fn to_level_numbers(&self) -> Vec<i64>;

    /// Panics if `levels.len() != Self::levels_count()`.
    fn from_level_numbers(levels: &[i64]) -> Self;

    fn multiply(&self, multiplicand: f64) -> Self;

    fn divide(&self, divisor: f64) -> Self;

    fn abs(&self) -> Self;

    /// Panics if `index >= levels_count()`.
    fn level_label(index: usize) -> ScoreLevel;

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }

    fn is_worse_than(&self, other: &Self) -> bool {
        self < other
    }
}

/// Scores that round-trip through a slash-separated string form.
pub trait ParseableScore: Score {
    fn parse(s: &str) -> Result<Self, ScoreParseError>;

    fn to_string_repr(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreParseError {
    pub message: String,
}

impl std::fmt::Display for ScoreParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "score parse error: {}", self.message)
    }
}

impl std::error::Error for ScoreParseError {}
