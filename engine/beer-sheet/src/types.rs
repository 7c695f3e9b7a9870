use serde::{Deserialize, Serialize};
use std::fmt;

/// Fantasy position covered by a beer sheet block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
}

impl Position {
    /// Two-letter code used as the prefix of positional ranks (e.g. "QB" in "QB12")
    pub fn code(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
        }
    }

    /// Positional label for the `sequence`-th player of a block (1-based)
    pub fn label(&self, sequence: usize) -> String {
        format!("{}{}", self.code(), sequence)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One player row of the beer sheet, normalized across positions
///
/// Only `name`, `position`, `rank`, `value` and `scarcity` are published; the
/// remaining columns are kept for logging and debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRanking {
    /// Player name (e.g., "Le'Veon Bell")
    pub name: String,

    /// Position code plus sequence within the block (e.g., "RB1")
    pub position: String,

    /// Raw "team/bye" cell (e.g., "PIT/9")
    #[serde(skip_serializing)]
    pub team_bye: String,

    /// Rank within the position
    pub rank: f32,

    /// ADP compared against rank
    #[serde(skip_serializing)]
    pub adp_vs_rank: f64,

    /// Free-form prior season note
    #[serde(skip_serializing)]
    pub past_performance: String,

    /// Cross-position value used for the final ordering
    pub value: f32,

    /// Positional scarcity as a fraction (0-1)
    pub scarcity: f32,
}
