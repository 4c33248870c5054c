//! Solves a bitmap maze and writes the result as an animated GIF.
//!
//! Pure black pixels are walls; everything else is passable. By default the
//! origin is the first open cell in the top row and the destination the
//! first open cell in the bottom row.
//!
//! # Usage
//!
//! ```bash
//! # Plain Dijkstra, path frame only
//! bitmap_pathfinding maze.png
//!
//! # A* with Manhattan estimate, diagonals, one frame per search step
//! bitmap_pathfinding maze.png -H man -d -s -o solved.gif
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use grid_util::grid::Grid;
use grid_util::point::Point;
use log::{info, warn};

use bitmap_pathfinding::error::{MazeError, Result};
use bitmap_pathfinding::maze_grid::MazeGrid;
use bitmap_pathfinding::render::GifRecorder;
use bitmap_pathfinding::search::{CostPolicy, SearchContext, SearchStatus};

/// Shortest paths on bitmap mazes, rendered as an animated GIF.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input bitmap (PNG or JPEG); pure black pixels are walls
    input: PathBuf,

    /// Allow diagonal movement (8-connected grid)
    #[arg(short = 'd', long)]
    diagonals: bool,

    /// Record every search step as a GIF frame
    #[arg(short = 's', long)]
    steps: bool,

    /// A* heuristic [manhattan|euclidian], unique prefixes accepted; omit to
    /// run plain Dijkstra
    #[arg(short = 'H', long)]
    heuristic: Option<String>,

    /// Origin cell as X,Y; defaults to the first open cell in the top row
    #[arg(long)]
    origin: Option<String>,

    /// Destination cell as X,Y; defaults to the first open cell in the
    /// bottom row
    #[arg(long)]
    dest: Option<String>,

    /// Output GIF path
    #[arg(short, long, default_value = "out.gif")]
    output: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    // Resolve configuration before any work; bad flags are fatal here.
    let policy = match &args.heuristic {
        Some(name) => CostPolicy::Astar(name.parse()?),
        None => CostPolicy::Dijkstra,
    };

    let image = image::open(&args.input)?;
    let mut maze = MazeGrid::from_image(&image);
    maze.allow_diagonal_move = args.diagonals;
    // Connectivity changed after construction, so the components must be
    // rebuilt before any reachability query.
    maze.generate_components();

    let origin = resolve_cell(&args.origin, &maze, 0, "top")?;
    let dest = resolve_cell(&args.dest, &maze, maze.height() - 1, "bottom")?;
    info!("searching from {:?} to {:?} with {:?}", origin, dest, policy);

    for (name, cell) in [("origin", origin), ("destination", dest)] {
        if !maze.can_move_to(cell) {
            warn!("{} {:?} is a wall or out of bounds", name, cell);
        }
    }
    if maze.unreachable(&origin, &dest) {
        warn!("origin and destination lie in different components");
    }

    let ctx = SearchContext::new(origin, dest, policy);
    let mut recorder = GifRecorder::new(&maze, args.steps);
    let result = ctx.run(&maze, |p, _| recorder.mark_finalized(*p));

    match result.status {
        SearchStatus::Reached => {
            let path = ctx.reconstruct(&result)?;
            info!(
                "found a path of {} steps ({} cells), visited {} cells",
                result.distances[&dest],
                path.len(),
                result.distances.len()
            );
            recorder.push_path_frame(&path);
            recorder.write_to(&args.output)?;
            Ok(())
        }
        SearchStatus::Unreachable => {
            // The flooded exploration is still worth keeping when asked for.
            if args.steps && recorder.frame_count() > 0 {
                recorder.write_to(&args.output)?;
            }
            Err(MazeError::NoPath)
        }
    }
}

fn resolve_cell(
    arg: &Option<String>,
    maze: &MazeGrid,
    row: usize,
    edge: &'static str,
) -> Result<Point> {
    match arg {
        Some(s) => parse_cell(s),
        None => maze
            .open_cell_in_row(row)
            .ok_or(MazeError::NoOpenCell(edge)),
    }
}

fn parse_cell(s: &str) -> Result<Point> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| MazeError::BadCoordinate(s.to_owned()))?;
    let x = x
        .trim()
        .parse()
        .map_err(|_| MazeError::BadCoordinate(s.to_owned()))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| MazeError::BadCoordinate(s.to_owned()))?;
    Ok(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_parsing() {
        assert_eq!(parse_cell("3,4").unwrap(), Point::new(3, 4));
        assert_eq!(parse_cell(" 10 , 0 ").unwrap(), Point::new(10, 0));
        assert!(parse_cell("3").is_err());
        assert!(parse_cell("a,b").is_err());
    }
}
