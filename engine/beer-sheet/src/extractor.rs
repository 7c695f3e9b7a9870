//! Position block extraction
//!
//! One routine serves every position: the block's [`ColumnMap`] says where each
//! field lives. Bad rank, ADP or scarcity cells become 0 and are reported as
//! recoverable issues; a bad value cell fails the whole extraction.

use crate::error::{CellFault, CellIssue, ExtractError, ExtractResult, Field, Severity};
use crate::grid::CellGrid;
use crate::layout::{ColumnMap, PositionBlock};
use crate::percent::parse_percent;
use crate::types::{PlayerRanking, Position};
use tracing::{debug, trace, warn};

/// A parsed row and the recoverable issues found along the way
#[derive(Debug, Clone, PartialEq)]
pub struct RowExtract {
    pub ranking: PlayerRanking,
    pub issues: Vec<CellIssue>,
}

/// Extract every row of `block`, in row order
pub fn extract_block(grid: &CellGrid, block: &PositionBlock) -> ExtractResult<Vec<PlayerRanking>> {
    let mut rankings = Vec::with_capacity(block.len());

    for (sequence, row) in block.rows() {
        let cells = grid.row(row).ok_or(ExtractError::RowOutOfRange {
            position: block.position,
            row,
            row_count: grid.row_count(),
        })?;

        let extract = extract_row(block.position, &block.columns, sequence, row, cells)
            .map_err(ExtractError::FatalCell)?;

        for issue in &extract.issues {
            warn!(
                position = %issue.position,
                row = issue.row,
                column = issue.column,
                field = %issue.field,
                cell = %issue.cell,
                "{} error: Row: {}, Col: {} ({}), defaulting to 0",
                issue.field,
                issue.row,
                issue.column,
                issue.reason
            );
        }

        trace!("Extracted {:?}", extract.ranking);
        rankings.push(extract.ranking);
    }

    debug!("Extracted {} {} rankings", rankings.len(), block.position);
    Ok(rankings)
}

/// Parse one sheet row into a ranking
///
/// `sequence` is the 1-based place of the row within its block. Returns the
/// fatal issue as the error when the value cell cannot be read.
pub fn extract_row(
    position: Position,
    columns: &ColumnMap,
    sequence: usize,
    row: usize,
    cells: &[String],
) -> Result<RowExtract, CellIssue> {
    let mut reader = RowReader { position, row, cells, issues: Vec::new() };

    let rank = reader.recoverable(Field::Rank, columns.rank, parse_f32);
    let adp_vs_rank = reader.recoverable(Field::AdpVsRank, columns.adp_vs_rank, parse_f64);
    let value = reader.required(Field::Value, columns.value, parse_f32)?;
    let scarcity = reader.recoverable(Field::Scarcity, columns.scarcity, parse_scarcity);

    let ranking = PlayerRanking {
        name: reader.text(columns.name).to_string(),
        position: position.label(sequence),
        team_bye: reader.text(columns.team_bye).to_string(),
        rank,
        adp_vs_rank,
        past_performance: reader.text(columns.past_performance).to_string(),
        value,
        scarcity,
    };

    Ok(RowExtract { ranking, issues: reader.issues })
}

struct RowReader<'a> {
    position: Position,
    row: usize,
    cells: &'a [String],
    issues: Vec<CellIssue>,
}

impl RowReader<'_> {
    /// Missing trailing cells read as empty text
    fn text(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    fn issue(&self, field: Field, column: usize, reason: CellFault) -> CellIssue {
        CellIssue {
            position: self.position,
            row: self.row,
            column,
            field,
            cell: self.text(column).to_string(),
            reason,
        }
    }

    fn recoverable<T: Default>(
        &mut self,
        field: Field,
        column: usize,
        parse: fn(&str) -> Result<T, CellFault>,
    ) -> T {
        debug_assert_eq!(field.severity(), Severity::Recoverable);
        match parse(self.text(column)) {
            Ok(parsed) => parsed,
            Err(reason) => {
                let issue = self.issue(field, column, reason);
                self.issues.push(issue);
                T::default()
            }
        }
    }

    fn required<T>(
        &self,
        field: Field,
        column: usize,
        parse: fn(&str) -> Result<T, CellFault>,
    ) -> Result<T, CellIssue> {
        parse(self.text(column)).map_err(|reason| self.issue(field, column, reason))
    }
}

fn parse_f32(cell: &str) -> Result<f32, CellFault> {
    let number: f32 = cell.parse().map_err(|_| CellFault::NumberFormat)?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(CellFault::NonFinite)
    }
}

fn parse_f64(cell: &str) -> Result<f64, CellFault> {
    let number: f64 = cell.parse().map_err(|_| CellFault::NumberFormat)?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(CellFault::NonFinite)
    }
}

fn parse_scarcity(cell: &str) -> Result<f32, CellFault> {
    // Narrow before the check: a finite f64 can overflow f32
    let fraction = parse_percent(cell)? as f32;
    if fraction.is_finite() {
        Ok(fraction)
    } else {
        Err(CellFault::NonFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::percent::PercentError;

    const COLUMNS: ColumnMap = ColumnMap {
        name: 0,
        team_bye: 1,
        rank: 2,
        adp_vs_rank: 3,
        past_performance: 4,
        value: 5,
        scarcity: 6,
    };

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    fn qb_row(name: &str, value: &str) -> Vec<String> {
        row(&[name, "NE/9", "1", "-2.5", "QB2", value, "40%"])
    }

    #[test]
    fn test_extract_row() {
        let cells = row(&["Tom Brady", "NE/9", "3", "1.5", "QB1", "42.25", "37.5%"]);
        let extract = extract_row(Position::QB, &COLUMNS, 3, 7, &cells).unwrap();

        assert!(extract.issues.is_empty());
        let ranking = extract.ranking;
        assert_eq!(ranking.name, "Tom Brady");
        assert_eq!(ranking.position, "QB3");
        assert_eq!(ranking.team_bye, "NE/9");
        assert_eq!(ranking.rank, 3.0);
        assert_eq!(ranking.adp_vs_rank, 1.5);
        assert_eq!(ranking.past_performance, "QB1");
        assert_eq!(ranking.value, 42.25);
        assert_eq!(ranking.scarcity, 0.375);
    }

    #[test]
    fn test_bad_optional_cells_default_to_zero() {
        let cells = row(&["Jordan Reed", "WAS/5", "TE3", "n/a", "", "18", "high"]);
        let extract = extract_row(Position::TE, &COLUMNS, 1, 40, &cells).unwrap();

        assert_eq!(extract.ranking.rank, 0.0);
        assert_eq!(extract.ranking.adp_vs_rank, 0.0);
        assert_eq!(extract.ranking.scarcity, 0.0);
        assert_eq!(extract.ranking.value, 18.0);

        let fields: Vec<Field> = extract.issues.iter().map(|issue| issue.field).collect();
        assert_eq!(fields, vec![Field::Rank, Field::AdpVsRank, Field::Scarcity]);

        let scarcity = &extract.issues[2];
        assert_eq!(scarcity.row, 40);
        assert_eq!(scarcity.column, 6);
        assert_eq!(scarcity.severity(), Severity::Recoverable);
        assert_eq!(scarcity.reason, CellFault::Percent(PercentError::MalformedPercentage));
    }

    #[test]
    fn test_bad_value_is_fatal() {
        let cells = qb_row("Cam Newton", "");
        let issue = extract_row(Position::QB, &COLUMNS, 2, 6, &cells).unwrap_err();

        assert_eq!(issue.field, Field::Value);
        assert_eq!(issue.severity(), Severity::Fatal);
        assert_eq!(issue.row, 6);
        assert_eq!(issue.column, 5);
        assert_eq!(issue.reason, CellFault::NumberFormat);
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let cells = qb_row("Cam Newton", "NaN");
        let issue = extract_row(Position::QB, &COLUMNS, 1, 5, &cells).unwrap_err();
        assert_eq!(issue.reason, CellFault::NonFinite);
    }

    #[test]
    fn test_scarcity_overflowing_f32_defaults_to_zero() {
        let cells = row(&["Tom Brady", "NE/9", "1", "0", "QB1", "10", "1e50%"]);
        let extract = extract_row(Position::QB, &COLUMNS, 1, 5, &cells).unwrap();

        assert_eq!(extract.ranking.scarcity, 0.0);
        assert_eq!(extract.issues.len(), 1);
        assert_eq!(extract.issues[0].field, Field::Scarcity);
        assert_eq!(extract.issues[0].reason, CellFault::NonFinite);
        assert_eq!(extract.issues[0].cell, "1e50%");
    }

    #[test]
    fn test_short_row_reads_missing_cells_as_empty() {
        let cells = row(&["Rob Gronkowski", "NE/9", "1", "0", "TE1", "30"]);
        let extract = extract_row(Position::TE, &COLUMNS, 1, 40, &cells).unwrap();

        assert_eq!(extract.ranking.value, 30.0);
        assert_eq!(extract.ranking.scarcity, 0.0);
        assert_eq!(extract.issues.len(), 1);
        assert_eq!(extract.issues[0].cell, "");
    }

    #[test]
    fn test_extract_block_numbers_positions_in_row_order() {
        let mut rows = vec![row(&["header"])];
        rows.push(qb_row("Aaron Rodgers", "50"));
        rows.push(qb_row("Tom Brady", "48"));
        rows.push(qb_row("Drew Brees", "47"));
        let grid = CellGrid::from_rows(rows);

        let block = PositionBlock::new(Position::QB, 1, 3, COLUMNS);
        let rankings = extract_block(&grid, &block).unwrap();

        let positions: Vec<&str> = rankings.iter().map(|r| r.position.as_str()).collect();
        assert_eq!(positions, vec!["QB1", "QB2", "QB3"]);
        let names: Vec<&str> = rankings.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Aaron Rodgers", "Tom Brady", "Drew Brees"]);
    }

    #[test]
    fn test_extract_block_stops_on_fatal_cell() {
        let grid = CellGrid::from_rows(vec![
            qb_row("Aaron Rodgers", "50"),
            qb_row("Tom Brady", "fifty"),
            qb_row("Drew Brees", "47"),
        ]);
        let block = PositionBlock::new(Position::QB, 0, 2, COLUMNS);

        match extract_block(&grid, &block) {
            Err(ExtractError::FatalCell(issue)) => {
                assert_eq!(issue.row, 1);
                assert_eq!(issue.field, Field::Value);
            }
            other => panic!("expected fatal cell, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_block_past_end_of_sheet() {
        let grid = CellGrid::from_rows(vec![qb_row("Aaron Rodgers", "50")]);
        let block = PositionBlock::new(Position::QB, 0, 4, COLUMNS);

        assert!(matches!(
            extract_block(&grid, &block),
            Err(ExtractError::RowOutOfRange { row: 1, row_count: 1, .. })
        ));
    }
}
