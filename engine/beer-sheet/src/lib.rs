//! Beer Sheet - positional draft rankings from a fixed-layout spreadsheet
//!
//! A beer sheet lays out one block of rows per position. This crate reads the
//! sheet into a grid of text cells, pulls each position block out using a
//! declarative [`SheetLayout`], and merges the blocks into one [`RankingBoard`]
//! ordered by value.

pub mod board;
pub mod error;
pub mod extractor;
pub mod grid;
pub mod layout;
pub mod percent;
pub mod types;

pub use board::RankingBoard;
pub use error::{CellFault, CellIssue, ExtractError, ExtractResult, Field, Severity};
pub use grid::{CellGrid, GridError};
pub use layout::{ColumnMap, LayoutError, PositionBlock, SheetLayout};
pub use percent::{parse_percent, PercentError};
pub use types::{PlayerRanking, Position};

/// Worksheet read when none is configured
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
