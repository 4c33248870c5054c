//! The maze grid and its adjacency provider.
//!
//! [MazeGrid] stores occupancy in a [BoolGrid] ([true] = wall) and yields
//! in-bounds passable neighborhoods, 4- or 8-connected. It also maintains
//! connected components in a [UnionFind] structure for cheap reachability
//! queries; the search engine itself never consults these and decides
//! unreachability by queue exhaustion alone.

use core::fmt;

use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use image::{DynamicImage, GenericImageView, Rgba};
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// A grid of walls and open cells derived from a bitmap.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    pub allow_diagonal_move: bool,
}

impl Default for MazeGrid {
    fn default() -> MazeGrid {
        MazeGrid {
            grid: BoolGrid::default(),
            components: UnionFind::new(0),
            components_dirty: false,
            allow_diagonal_move: false,
        }
    }
}

impl MazeGrid {
    /// Builds a grid from a decoded bitmap. A pixel is a wall exactly when
    /// its red, green and blue components are all zero.
    pub fn from_image(image: &DynamicImage) -> MazeGrid {
        let (width, height) = image.dimensions();
        let mut maze = MazeGrid::new(width as usize, height as usize, false);
        for y in 0..height {
            for x in 0..width {
                let Rgba([r, g, b, _]) = image.get_pixel(x, y);
                if r == 0 && g == 0 && b == 0 {
                    maze.grid.set(x as usize, y as usize, true);
                }
            }
        }
        maze.generate_components();
        maze
    }

    /// The in-bounds passable neighbors of `p`: left, right, up, down, and
    /// with [allow_diagonal_move](Self::allow_diagonal_move) the four
    /// diagonals as well. Diagonal steps are legal whenever the target cell
    /// is open, even between two orthogonally adjacent walls.
    pub fn neighborhood_points(&self, p: &Point) -> SmallVec<[Point; 8]> {
        // Orthogonal deltas first, diagonals after, so the 4-connected
        // neighborhood is a prefix of the 8-connected one.
        const DELTAS: [(i32, i32); 8] = [
            (-1, 0),
            (1, 0),
            (0, -1),
            (0, 1),
            (-1, -1),
            (1, -1),
            (1, 1),
            (-1, 1),
        ];
        let deltas = if self.allow_diagonal_move {
            &DELTAS[..]
        } else {
            &DELTAS[..4]
        };
        deltas
            .iter()
            .map(|(dx, dy)| Point::new(p.x + dx, p.y + dy))
            .filter(|n| self.can_move_to(*n))
            .collect()
    }

    pub fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && !self.grid.get_point(pos)
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.grid.index_in_bounds(x as usize, y as usize)
    }

    fn cell_ix(&self, p: &Point) -> usize {
        self.grid.get_ix(p.x as usize, p.y as usize)
    }

    /// The first open cell in row `y`, scanning left to right. Used to pick
    /// default endpoints on the top and bottom edges.
    pub fn open_cell_in_row(&self, y: usize) -> Option<Point> {
        (0..self.grid.width)
            .map(|x| Point::new(x as i32, y as i32))
            .find(|p| !self.grid.get_point(*p))
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.cell_ix(point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            !self.components.equiv(self.cell_ix(start), self.cell_ix(goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("components are dirty, regenerating");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to
    /// the same components, honoring the connectivity mode.
    pub fn generate_components(&mut self) {
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        // Forward neighbors only; the union is symmetric.
        let forward: &[(i32, i32)] = if self.allow_diagonal_move {
            &[(1, 0), (0, 1), (1, 1), (1, -1)]
        } else {
            &[(1, 0), (0, 1)]
        };
        for x in 0..w {
            for y in 0..h {
                if self.grid.get(x, y) {
                    continue;
                }
                let point = Point::new(x as i32, y as i32);
                let parent_ix = self.grid.get_ix(x, y);
                for (dx, dy) in forward {
                    let n = Point::new(point.x + dx, point.y + dy);
                    if self.can_move_to(n) {
                        let n_ix = self.cell_ix(&n);
                        self.components.union(parent_ix, n_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                write!(f, "{}", if self.grid.get(x, y) { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Grid<bool> for MazeGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        MazeGrid {
            grid: BoolGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
            allow_diagonal_move: false,
        }
    }
    fn get(&self, x: usize, y: usize) -> bool {
        self.grid.get(x, y)
    }
    /// Updates a position on the grid and flags the components as dirty.
    fn set(&mut self, x: usize, y: usize, blocked: bool) {
        if self.grid.get(x, y) != blocked {
            self.components_dirty = true;
        }
        self.grid.set(x, y, blocked);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    /// Tests whether points are correctly mapped to different connected
    /// components.
    #[test]
    fn component_generation() {
        // Corresponds to the following 3x2 grid:
        //  ___
        // |.#.|
        // |.#.|
        //  ___
        let mut maze = MazeGrid::new(3, 2, false);
        maze.set(1, 0, true);
        maze.set(1, 1, true);
        maze.generate_components();
        let p1 = Point::new(0, 0);
        let p2 = Point::new(0, 1);
        let p3 = Point::new(2, 0);
        assert!(maze.reachable(&p1, &p2));
        assert!(maze.unreachable(&p1, &p3));
        assert!(maze.unreachable(&p1, &Point::new(1, 0)));
    }

    /// Diagonal connectivity joins components that 4-connectivity keeps
    /// apart.
    #[test]
    fn diagonal_switch_changes_reachability() {
        //  __
        // |.#|
        // |#.|
        //  __
        for (diagonal, expected) in [(false, false), (true, true)] {
            let mut maze = MazeGrid::new(2, 2, false);
            maze.allow_diagonal_move = diagonal;
            maze.set(1, 0, true);
            maze.set(0, 1, true);
            maze.generate_components();
            assert_eq!(maze.reachable(&Point::new(0, 0), &Point::new(1, 1)), expected);
        }
    }

    #[test]
    fn neighborhoods_exclude_walls_and_bounds() {
        let mut maze = MazeGrid::new(3, 3, false);
        maze.set(1, 0, true);
        maze.generate_components();

        let corner = Point::new(0, 0);
        let neighbors = maze.neighborhood_points(&corner);
        assert_eq!(neighbors.as_slice(), &[Point::new(0, 1)]);

        maze.allow_diagonal_move = true;
        let neighbors = maze.neighborhood_points(&corner);
        assert_eq!(neighbors.as_slice(), &[Point::new(0, 1), Point::new(1, 1)]);
    }

    #[test]
    fn walls_come_from_black_pixels() {
        let mut pixels = RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 255]));
        pixels.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        pixels.put_pixel(1, 1, Rgba([0, 0, 0, 255]));
        // Dark but not pure black stays passable.
        pixels.put_pixel(2, 1, Rgba([1, 0, 0, 255]));
        let maze = MazeGrid::from_image(&DynamicImage::ImageRgba8(pixels));
        assert!(maze.grid.get(1, 0));
        assert!(maze.grid.get(1, 1));
        assert!(!maze.grid.get(0, 0));
        assert!(!maze.grid.get(2, 1));
        // Components were generated by from_image.
        assert!(maze.unreachable(&Point::new(0, 0), &Point::new(2, 0)));
    }

    #[test]
    fn open_cell_scan() {
        let mut maze = MazeGrid::new(4, 2, false);
        maze.set(0, 0, true);
        maze.set(1, 0, true);
        assert_eq!(maze.open_cell_in_row(0), Some(Point::new(2, 0)));
        assert_eq!(maze.open_cell_in_row(1), Some(Point::new(0, 1)));
        for x in 0..4 {
            maze.set(x, 1, true);
        }
        assert_eq!(maze.open_cell_in_row(1), None);
    }
}
