//! Beer sheet inspection tool
//!
//! `dump` prints the raw cells of a position block so a new sheet's layout can
//! be worked out; `check` runs every block through the extractor and reports
//! the cells that would be defaulted or would stop the service.

use anyhow::{bail, Context, Result};
use beer_sheet::extractor::extract_row;
use beer_sheet::{
    CellGrid, Position, PositionBlock, RankingBoard, SheetLayout, DEFAULT_SHEET_NAME,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheet-inspect")]
#[command(about = "Inspect a beer sheet and check its layout")]
struct Cli {
    /// Beer sheet workbook or CSV export
    sheet: PathBuf,

    /// Worksheet to read from the workbook
    #[arg(long, default_value = DEFAULT_SHEET_NAME)]
    sheet_name: String,

    /// TOML sheet layout file (defaults to the reference beer sheet layout)
    #[arg(long)]
    layout: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every cell of a position block
    Dump {
        #[arg(value_enum)]
        position: PositionArg,
    },
    /// Extract every block and report unreadable cells
    Check {
        /// Number of top players to print
        #[arg(long, default_value = "10")]
        top: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PositionArg {
    Qb,
    Rb,
    Wr,
    Te,
}

impl From<PositionArg> for Position {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Qb => Position::QB,
            PositionArg::Rb => Position::RB,
            PositionArg::Wr => Position::WR,
            PositionArg::Te => Position::TE,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("error").init();

    let cli = Cli::parse();

    let layout = match &cli.layout {
        Some(path) => SheetLayout::load_from_file(path)?,
        None => SheetLayout::beer_sheet(),
    };
    let grid = CellGrid::open(&cli.sheet, &cli.sheet_name)
        .with_context(|| format!("Failed to load {:?}", cli.sheet))?;

    match cli.command {
        Commands::Dump { position } => {
            let position = Position::from(position);
            let block = layout
                .block(position)
                .with_context(|| format!("Layout has no {position} block"))?;
            dump_block(&grid, block);
        }
        Commands::Check { top } => check_layout(&grid, &layout, top)?,
    }

    Ok(())
}

fn dump_block(grid: &CellGrid, block: &PositionBlock) {
    let columns = block.columns.all();
    let first = columns.iter().copied().min().unwrap_or(0);
    let last = columns.iter().copied().max().unwrap_or(0);

    for (sequence, row) in block.rows() {
        println!("{}: Row {}", block.position.label(sequence), row);
        for column in first..=last {
            let cell = grid.cell(row, column).unwrap_or("<missing>");
            println!("  Col {:>3}: {}", column, cell);
        }
    }
}

fn check_layout(grid: &CellGrid, layout: &SheetLayout, top: usize) -> Result<()> {
    let mut recoverable = 0;

    for block in &layout.blocks {
        for (sequence, row) in block.rows() {
            let Some(cells) = grid.row(row) else {
                bail!(
                    "{} block row {} is outside the sheet ({} rows)",
                    block.position,
                    row,
                    grid.row_count()
                );
            };

            match extract_row(block.position, &block.columns, sequence, row, cells) {
                Ok(extract) => {
                    for issue in extract.issues {
                        println!("warning: {issue}");
                        recoverable += 1;
                    }
                }
                Err(issue) => bail!("fatal: {issue}"),
            }
        }
    }

    let board = RankingBoard::build(grid, layout)?;
    println!("{} players, {} cells defaulted to 0", board.len(), recoverable);
    for (place, ranking) in board.top_players(top).iter().enumerate() {
        println!(
            "{:>3}. {:<6} {:<28} value {:>7.2}  scarcity {:>5.1}%",
            place + 1,
            ranking.position,
            ranking.name,
            ranking.value,
            ranking.scarcity * 100.0
        );
    }

    Ok(())
}
