//! Merged, value-ordered rankings across all positions

use crate::error::{ExtractError, ExtractResult};
use crate::extractor::extract_block;
use crate::grid::CellGrid;
use crate::layout::SheetLayout;
use crate::types::PlayerRanking;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::info;

/// The published draft board
///
/// Built once from the sheet and never modified afterwards; share it behind an
/// `Arc` to serve concurrent readers.
#[derive(Debug, Clone)]
pub struct RankingBoard {
    rankings: Vec<PlayerRanking>,
    built_at: DateTime<Utc>,
}

impl RankingBoard {
    /// Extract every block of `layout` from `grid` and merge them by value
    pub fn build(grid: &CellGrid, layout: &SheetLayout) -> ExtractResult<Self> {
        if grid.is_empty() {
            return Err(ExtractError::EmptySheet);
        }
        info!("Building ranking board from {} position blocks", layout.blocks.len());

        let mut rankings = Vec::with_capacity(layout.player_count());
        for block in &layout.blocks {
            let block_rankings = extract_block(grid, block)?;
            info!(
                "Loaded {} {} rankings from rows {}-{}",
                block_rankings.len(),
                block.position,
                block.first_row,
                block.last_row
            );
            rankings.extend(block_rankings);
        }

        let board = Self::from_rankings(rankings);
        if let Some(top) = board.rankings.first() {
            info!(
                "Ranking board ready with {} players, top player: {} ({}, value {})",
                board.len(),
                top.name,
                top.position,
                top.value
            );
        }

        Ok(board)
    }

    /// Order `rankings` by value, highest first
    ///
    /// The sort is stable: players with equal value keep their incoming order.
    pub fn from_rankings(mut rankings: Vec<PlayerRanking>) -> Self {
        rankings.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        Self { rankings, built_at: Utc::now() }
    }

    pub fn rankings(&self) -> &[PlayerRanking] {
        &self.rankings
    }

    pub fn len(&self) -> usize {
        self.rankings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }

    /// When the board was assembled
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Get top N players by value
    pub fn top_players(&self, limit: usize) -> &[PlayerRanking] {
        &self.rankings[..limit.min(self.rankings.len())]
    }
}
