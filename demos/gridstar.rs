//! Terminal A* demo.
//!
//! Run: cargo run --bin gridstar -- --seed 7 --replay
//!      cargo run --bin gridstar -- --map maze.txt --plain

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use gridstar_core::Coord;
use gridstar_demos::{
    DEFAULT_COLS, DEFAULT_ROWS, Overlay, draw_frame, draw_legend, parse_coord, replay,
    scatter_obstacles,
};
use gridstar_paths::{AsciiMap, Error, Grid, Recorder, SearchConfig, SearchEngine, SearchState};
use rand::SeedableRng;

#[derive(Debug, Parser)]
#[command(name = "gridstar", version, about = "Shortest paths on obstacle grids with A*")]
struct Cli {
    /// Read the grid from an ASCII map ('.' free, '#' obstacle, 'S' start, 'E' end)
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Rows of a generated grid
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: i32,

    /// Columns of a generated grid
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: i32,

    /// Probability that a generated cell is an obstacle
    #[arg(long, default_value_t = 0.25)]
    density: f64,

    /// Seed for grid generation (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Start cell as ROW,COL (overrides the map's 'S')
    #[arg(long, value_parser = parse_coord)]
    start: Option<Coord>,

    /// End cell as ROW,COL (overrides the map's 'E')
    #[arg(long, value_parser = parse_coord)]
    end: Option<Coord>,

    /// Give up after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Animate the search expansion and the path
    #[arg(long)]
    replay: bool,

    /// Delay between replay frames
    #[arg(long, default_value_t = 30)]
    delay_ms: u64,

    /// Print the result as an ASCII map instead of colours
    #[arg(long)]
    plain: bool,
}

fn load(cli: &Cli) -> Result<(Grid, Coord, Coord), Box<dyn std::error::Error>> {
    if let Some(file) = &cli.map {
        let text = std::fs::read_to_string(file)?;
        let map = AsciiMap::parse(&text)?;
        let start = cli.start.or(map.start).ok_or("map has no start; use --start")?;
        let end = cli.end.or(map.end).ok_or("map has no end; use --end")?;
        log::info!("loaded {} map from {}", map.grid.dims(), file.display());
        return Ok((map.grid, start, end));
    }

    let mut grid = Grid::new(cli.rows, cli.cols)?;
    let start = cli.start.unwrap_or(Coord::ZERO);
    let end = cli.end.unwrap_or(Coord::new(cli.rows - 1, cli.cols - 1));
    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let blocked = scatter_obstacles(&mut grid, cli.density, &[start, end], &mut rng);
    log::info!(
        "generated {} grid with {blocked} obstacles (seed {seed})",
        grid.dims()
    );
    Ok((grid, start, end))
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let (mut grid, start, end) = load(cli)?;

    let mut config = SearchConfig::new();
    if let Some(limit) = cli.max_expansions {
        config = config.with_max_expansions(limit);
    }
    let mut engine = SearchEngine::new(config);
    let mut recorder = Recorder::new();
    let result = engine.find_path_observed(&mut grid, start, end, &mut recorder);
    let stats = engine.stats();
    log::info!(
        "{:?}: {} expanded, {} pushed, {} stale",
        engine.state(),
        stats.expanded,
        stats.pushed,
        stats.stale_skipped
    );

    let path = match result {
        Ok(path) => Some(path),
        Err(Error::Unreachable | Error::IterationLimit { .. }) => None,
        Err(e) => return Err(e.into()),
    };

    let mut out = io::stdout().lock();
    if cli.plain {
        let map = AsciiMap {
            grid,
            start: Some(start),
            end: Some(end),
        };
        writeln!(out, "{}", map.render(path.as_ref()))?;
    } else if cli.replay {
        replay(
            &mut out,
            &grid,
            start,
            end,
            &recorder.expanded,
            &recorder.path,
            Duration::from_millis(cli.delay_ms),
        )?;
        draw_legend(&mut out)?;
    } else {
        let overlay = Overlay {
            start: Some(start),
            end: Some(end),
            expanded: &recorder.expanded,
            path: &recorder.path,
        };
        draw_frame(&mut out, &grid, &overlay)?;
        draw_legend(&mut out)?;
    }

    match path {
        Some(path) => {
            writeln!(
                out,
                "path {start} -> {end}: {} cells, cost {}",
                path.len(),
                path.cost()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        None if engine.state() == SearchState::Aborted => {
            writeln!(out, "gave up after {} expansions", stats.expanded)?;
            Ok(ExitCode::from(3))
        }
        None => {
            writeln!(out, "no path: {end} is unreachable from {start}")?;
            Ok(ExitCode::from(2))
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
