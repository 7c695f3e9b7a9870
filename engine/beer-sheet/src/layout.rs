//! Declarative description of where each position block lives on the sheet

use crate::types::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating a layout
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to read layout {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse layout {path:?}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },

    #[error("Layout has no position blocks")]
    Empty,

    #[error("{position} block starts at row {first_row} but ends at row {last_row}")]
    InvertedRows { position: Position, first_row: usize, last_row: usize },

    #[error("{0} block appears more than once")]
    DuplicatePosition(Position),
}

/// 0-based column of each field within a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub name: usize,
    pub team_bye: usize,
    pub rank: usize,
    pub adp_vs_rank: usize,
    pub past_performance: usize,
    pub value: usize,
    pub scarcity: usize,
}

impl ColumnMap {
    /// Columns shared by the quarterback and tight end blocks
    pub const QB_TE: ColumnMap = ColumnMap {
        name: 2,
        team_bye: 4,
        rank: 6,
        adp_vs_rank: 7,
        past_performance: 8,
        value: 10,
        scarcity: 13,
    };

    pub const RB: ColumnMap = ColumnMap {
        name: 17,
        team_bye: 19,
        rank: 20,
        adp_vs_rank: 21,
        past_performance: 22,
        value: 23,
        scarcity: 26,
    };

    pub const WR: ColumnMap = ColumnMap {
        name: 30,
        team_bye: 32,
        rank: 34,
        adp_vs_rank: 35,
        past_performance: 36,
        value: 38,
        scarcity: 41,
    };

    /// Every mapped column, in field order
    pub fn all(&self) -> [usize; 7] {
        [
            self.name,
            self.team_bye,
            self.rank,
            self.adp_vs_rank,
            self.past_performance,
            self.value,
            self.scarcity,
        ]
    }
}

/// A contiguous run of rows holding one position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionBlock {
    pub position: Position,

    /// First row of the block (0-based, inclusive)
    pub first_row: usize,

    /// Last row of the block (0-based, inclusive)
    pub last_row: usize,

    pub columns: ColumnMap,
}

impl PositionBlock {
    pub fn new(position: Position, first_row: usize, last_row: usize, columns: ColumnMap) -> Self {
        Self { position, first_row, last_row, columns }
    }

    /// Rows of the block paired with their 1-based sequence number
    pub fn rows(&self) -> impl Iterator<Item = (usize, usize)> {
        (self.first_row..=self.last_row).enumerate().map(|(offset, row)| (offset + 1, row))
    }

    pub fn len(&self) -> usize {
        (self.last_row + 1).saturating_sub(self.first_row)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All position blocks of a sheet, in aggregation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub blocks: Vec<PositionBlock>,
}

impl SheetLayout {
    /// Layout of the 2017 beer sheet (10 team, 0 PPR, 1QB 2RB 2WR 1TE 1FLX)
    pub fn beer_sheet() -> Self {
        Self {
            blocks: vec![
                PositionBlock::new(Position::QB, 5, 36, ColumnMap::QB_TE),
                PositionBlock::new(Position::RB, 5, 64, ColumnMap::RB),
                PositionBlock::new(Position::WR, 5, 64, ColumnMap::WR),
                PositionBlock::new(Position::TE, 40, 64, ColumnMap::QB_TE),
            ],
        }
    }

    /// Load and validate a layout from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| LayoutError::Io { path: path.to_path_buf(), source })?;
        let layout: SheetLayout = toml::from_str(&content)
            .map_err(|source| LayoutError::Parse { path: path.to_path_buf(), source })?;

        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.blocks.is_empty() {
            return Err(LayoutError::Empty);
        }

        let mut seen = HashSet::new();
        for block in &self.blocks {
            if block.first_row > block.last_row {
                return Err(LayoutError::InvertedRows {
                    position: block.position,
                    first_row: block.first_row,
                    last_row: block.last_row,
                });
            }
            if !seen.insert(block.position) {
                return Err(LayoutError::DuplicatePosition(block.position));
            }
        }

        Ok(())
    }

    pub fn block(&self, position: Position) -> Option<&PositionBlock> {
        self.blocks.iter().find(|block| block.position == position)
    }

    /// Number of players the layout yields
    pub fn player_count(&self) -> usize {
        self.blocks.iter().map(PositionBlock::len).sum()
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self::beer_sheet()
    }
}
