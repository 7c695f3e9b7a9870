//! Error types for beer sheet extraction

use crate::percent::PercentError;
use crate::types::Position;
use std::fmt;
use thiserror::Error;

/// Numeric column of a player row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Rank,
    AdpVsRank,
    Value,
    Scarcity,
}

impl Field {
    /// Value drives the cross-position ordering, so a bad value cell cannot be defaulted
    pub fn severity(&self) -> Severity {
        match self {
            Field::Value => Severity::Fatal,
            Field::Rank | Field::AdpVsRank | Field::Scarcity => Severity::Recoverable,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Rank => "rank",
            Field::AdpVsRank => "adp_vs_rank",
            Field::Value => "value",
            Field::Scarcity => "scarcity",
        };
        f.write_str(name)
    }
}

/// How the pipeline reacts to a bad cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Logged, the field is set to 0 and extraction continues
    Recoverable,
    /// Extraction stops and the service does not start
    Fatal,
}

/// Why a cell could not be read as a number
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CellFault {
    #[error("not a number")]
    NumberFormat,

    #[error("number is not finite")]
    NonFinite,

    #[error("bad percentage: {0}")]
    Percent(#[from] PercentError),
}

/// A single unreadable cell, located by 0-based row and column
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{position} {field} error: row {row}, col {column}, cell {cell:?}: {reason}")]
pub struct CellIssue {
    pub position: Position,
    pub row: usize,
    pub column: usize,
    pub field: Field,
    pub cell: String,
    pub reason: CellFault,
}

impl CellIssue {
    pub fn severity(&self) -> Severity {
        self.field.severity()
    }
}

/// Errors that stop the extraction pipeline
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Sheet has no rows")]
    EmptySheet,

    #[error("{position} block row {row} is outside the sheet ({row_count} rows)")]
    RowOutOfRange { position: Position, row: usize, row_count: usize },

    #[error("Fatal cell: {0}")]
    FatalCell(CellIssue),
}

/// Result type for extraction
pub type ExtractResult<T> = Result<T, ExtractError>;
