//! Statistics file writer: semicolon-separated `Time;Strict;Hard;Soft`, one
//! row per recorded best-so-far sample.

use std::fmt::Write as _;

use nurseroster_solver::ScoreStatistics;

/// Renders every recorded sample as a `Time;Strict;Hard;Soft` table with a
/// header row.
pub fn render(statistics: &ScoreStatistics) -> String {
    let mut out = String::from("Time;Strict;Hard;Soft\n");
    for point in statistics.points() {
        let score = point.score;
        let _ = writeln!(out, "{};{};{};{}", point.millis, score.strict(), score.hard(), score.soft());
    }
    out
}
