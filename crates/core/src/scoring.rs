//! Scoring module - score table, line counter and speed bookkeeping
//!
//! Every clear adds the points of its line type and one line. The speed value
//! follows the lines total past 10/20/30 but is only recorded; nothing reads it
//! to change the drop timer.
//!
//! The display pair mirrors what a score/line text sink would show. It is
//! refreshed on every clear and zeroed on game over, while the running totals
//! carry on unless the caller also asks for them to be reset.

use crate::types::{speed_for_lines, LineType};

/// Score calculation result for a single clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    pub line_type: LineType,
    pub points: u32,
    /// Lines total after this clear.
    pub lines: u32,
}

/// Points awarded for one clear of the given type
pub fn calculate_score(line_type: LineType) -> u32 {
    line_type.points()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    score: u32,
    lines: u32,
    speed: Option<u8>,
    display_score: u32,
    display_lines: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one clear.
    pub fn record_clear(&mut self, line_type: LineType) -> ScoreResult {
        let points = calculate_score(line_type);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(1);
        if let Some(speed) = speed_for_lines(self.lines) {
            self.speed = Some(speed);
        }
        self.display_score = self.score;
        self.display_lines = self.lines;

        ScoreResult {
            line_type,
            points,
            lines: self.lines,
        }
    }

    /// Zero the displayed values only.
    pub fn reset_display(&mut self) {
        self.display_score = 0;
        self.display_lines = 0;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn speed(&self) -> Option<u8> {
        self.speed
    }

    pub fn display_score(&self) -> u32 {
        self.display_score
    }

    pub fn display_lines(&self) -> u32 {
        self.display_lines
    }
}
