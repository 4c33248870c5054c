//! Rasterizes the search for animation.
//!
//! Frames use a fixed four-color scheme: black walls, white open cells, blue
//! finalized cells, red path. With step recording enabled, every finalized
//! cell produces one frame, so the GIF replays the exploration in finalize
//! order before the final path frame.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use grid_util::grid::Grid;
use grid_util::point::Point;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};

use crate::error::Result;
use crate::maze_grid::MazeGrid;

pub const WALL: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const OPEN: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const FINALIZED: Rgba<u8> = Rgba([0, 0, 255, 255]);
pub const PATH: Rgba<u8> = Rgba([255, 0, 0, 255]);

const FRAME_DELAY_MS: u32 = 100;

/// Collects animation frames while observing a search, then encodes them as
/// a looping GIF.
pub struct GifRecorder {
    base: RgbaImage,
    canvas: RgbaImage,
    frames: Vec<Frame>,
    record_steps: bool,
}

impl GifRecorder {
    pub fn new(maze: &MazeGrid, record_steps: bool) -> GifRecorder {
        let base = rasterize(maze);
        GifRecorder {
            canvas: base.clone(),
            base,
            frames: Vec::new(),
            record_steps,
        }
    }

    /// Paints `p` as finalized; with step recording on, snapshots a frame.
    /// Intended to be called from the search's finalize observer.
    pub fn mark_finalized(&mut self, p: Point) {
        self.canvas.put_pixel(p.x as u32, p.y as u32, FINALIZED);
        if self.record_steps {
            self.frames.push(make_frame(self.canvas.clone()));
        }
    }

    /// Appends the closing frame: walls and open cells only, with the path
    /// drawn in red.
    pub fn push_path_frame(&mut self, path: &[Point]) {
        let mut buffer = self.base.clone();
        for p in path {
            buffer.put_pixel(p.x as u32, p.y as u32, PATH);
        }
        self.frames.push(make_frame(buffer));
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[cfg(test)]
    pub(crate) fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Encodes all collected frames as an endlessly looping GIF.
    pub fn write_to(self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        let mut encoder = GifEncoder::new(writer);
        encoder.set_repeat(Repeat::Infinite)?;
        encoder.encode_frames(self.frames)?;
        Ok(())
    }
}

fn make_frame(buffer: RgbaImage) -> Frame {
    Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(FRAME_DELAY_MS, 1))
}

fn rasterize(maze: &MazeGrid) -> RgbaImage {
    RgbaImage::from_fn(maze.width() as u32, maze.height() as u32, |x, y| {
        if maze.get(x as usize, y as usize) {
            WALL
        } else {
            OPEN
        }
    })
}
