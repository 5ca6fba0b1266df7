//! Score types: the lexicographic strict/hard/soft triple every constraint
//! contributes to, and the trait machinery that makes it comparable.

#[macro_use]
mod macros;

mod level;
mod strict_hard_soft;
pub mod traits;

pub use level::ScoreLevel;
pub use strict_hard_soft::StrictHardSoftScore;
pub use traits::{ParseableScore, Score, ScoreParseError};
