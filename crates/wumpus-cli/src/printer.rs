//! Turn-by-turn console output.

use std::io::Write;

use tracing::warn;
use wumpus_core::{EpisodeResult, TurnCallback, TurnRecord};

/// Prints one line per turn to the wrapped writer.
pub struct TurnPrinter<W: Write> {
    out: W,
}

impl<W: Write> TurnPrinter<W> {
    /// Wrap a writer.
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> TurnCallback for TurnPrinter<W> {
    fn on_turn(&mut self, record: &TurnRecord) {
        if let Err(e) = writeln!(self.out, "{}", format_turn(record)) {
            warn!(error = %e, step = record.step, "Failed to print turn");
        }
    }
}

/// Render one turn as a table row.
pub fn format_turn(record: &TurnRecord) -> String {
    let rule = record.rule.map_or_else(String::new, |r| r.to_string());
    format!(
        "step {:>3}  {:<8} {:<6} {}  {:<13} score {:>6}  ({rule})",
        record.step,
        record.cell.to_string(),
        record.facing.to_string(),
        record.percept,
        record.action.to_string(),
        record.score,
    )
}

/// Render the final outcome line.
pub fn format_outcome(result: &EpisodeResult) -> String {
    format!(
        "Outcome: {} after {} steps, score {}",
        result.end_reason, result.steps, result.score
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wumpus_agents::Rule;
    use wumpus_core::EndReason;
    use wumpus_types::{Action, Cell, Direction, PerceptSet};

    use super::*;

    fn record() -> TurnRecord {
        TurnRecord {
            step: 2,
            cell: Cell::new(1, 2),
            facing: Direction::North,
            percept: PerceptSet::none().with_stench(),
            action: Action::TurnRight,
            rule: Some(Rule::TravelToFrontier),
            score: -2,
        }
    }

    #[test]
    fn turn_line_names_every_column() {
        let line = format_turn(&record());
        assert!(line.starts_with("step   2"));
        assert!(line.contains("(1, 2)"));
        assert!(line.contains("Stench"));
        assert!(line.contains("turn_right"));
        assert!(line.contains("score     -2"));
        assert!(line.ends_with("(travel to frontier)"));
    }

    #[test]
    fn printer_writes_one_line_per_turn() {
        let mut printer = TurnPrinter::new(Vec::new());
        printer.on_turn(&record());
        printer.on_turn(&record());
        let text = String::from_utf8(printer.out).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn outcome_line_reads_naturally() {
        let result = EpisodeResult {
            end_reason: EndReason::ClimbedOutWithGold,
            steps: 18,
            score: 1082,
            world_score: 1082,
            has_gold: true,
        };
        assert_eq!(
            format_outcome(&result),
            "Outcome: climbed out with the gold after 18 steps, score 1082"
        );
    }
}
