use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use wythoff_core::*;

/// Classify Wythoff's game positions and render every step as PPM frames.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Cells per side of the board
    #[arg(long, default_value_t = GridConfig::default().size)]
    size: Coord,

    /// Margin in pixels before the first grid line
    #[arg(long, default_value_t = GridConfig::default().tick_size)]
    tick_size: Px,

    /// Arrowhead size in pixels, also sets the cell size
    #[arg(long, default_value_t = GridConfig::default().arrowhead)]
    arrowhead: Px,

    /// Grid line thickness in pixels
    #[arg(long, default_value_t = GridConfig::default().line_thickness)]
    line_thickness: Px,

    /// Directory the frames are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// File name prefix of every frame
    #[arg(long, default_value = DEFAULT_FRAME_PREFIX)]
    prefix: String,

    /// Smallest coin total to highlight and report
    #[arg(long, default_value_t = 20)]
    highlight_from: usize,

    /// Largest coin total to highlight and report
    #[arg(long, default_value_t = 30)]
    highlight_to: usize,

    /// Assemble the frames into this GIF with ImageMagick's `convert`
    #[arg(long)]
    gif: Option<PathBuf>,

    /// Print the winning splits as JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let config = GridConfig::new(cli.size, cli.tick_size, cli.arrowhead, cli.line_thickness)
        .context("Invalid board geometry")?;
    let sink = PpmFileSink::new(&cli.out_dir, cli.prefix.as_str(), DEFAULT_FRAME_SUFFIX);
    let mut grid = GameGrid::new(config, sink);

    grid.render_frame()?;
    while !grid.is_done() {
        grid.step()?;
    }
    log::info!("classified {} positions in {} rounds", config.total_cells(), grid.rounds());
    grid.clear_arrows();
    grid.render_frame()?;

    let mut splits = Vec::new();
    for coins in highlight_range(&cli, config.size) {
        grid.set_highlight(Some(coins));
        grid.render_frame()?;
        splits.extend(grid.winning_splits(coins));
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&splits)?);
    } else {
        for split in &splits {
            println!(
                "With {} coins, piles of {} and {} are a winning solution!",
                split.coins, split.pile_a, split.pile_b
            );
        }
    }

    let sink = grid.into_sink();
    log::info!("wrote {} frames to {}", sink.frames_written(), sink.directory().display());
    if let Some(gif) = &cli.gif {
        assemble_gif(&sink, gif)?;
    }
    Ok(())
}

/// Requested coin totals, limited to the ones that have cells on the board.
fn highlight_range(cli: &Cli, size: Coord) -> RangeInclusive<usize> {
    let max_coins = 2 * (usize::from(size) - 1);
    if cli.highlight_to > max_coins {
        log::warn!(
            "Highlight range clamped to {}, board of size {} has no larger splits",
            max_coins,
            size
        );
    }
    cli.highlight_from..=cli.highlight_to.min(max_coins)
}

fn assemble_gif(sink: &PpmFileSink, gif: &Path) -> Result<()> {
    let status = Command::new("convert")
        .args(["-delay", "100", "-loop", "0"])
        .args(sink.written_paths())
        .arg(gif)
        .status()
        .context("Could not run ImageMagick `convert`")?;
    if !status.success() {
        bail!("`convert` exited with {}", status);
    }
    log::info!("wrote animation to {}", gif.display());
    Ok(())
}
