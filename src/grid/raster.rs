//! DDA line rasterization.
//!
//! Joins two discrete sensor detections with a digital-differential-analyzer
//! line: unit steps along the dominant axis, fractional steps along the
//! other, each position rounded to the nearest cell. Both endpoints are
//! produced.

use crate::core::GridCoord;

/// Iterator over the cells of a DDA line from `start` to `end`, inclusive.
pub struct DdaLine {
    x: f64,
    y: f64,
    x_inc: f64,
    y_inc: f64,
    remaining: i32,
}

impl DdaLine {
    /// Create a line iterator. A degenerate line (`start == end`) yields the
    /// single shared cell once.
    pub fn new(start: GridCoord, end: GridCoord) -> Self {
        let dx = (end.x - start.x) as f64;
        let dy = (end.y - start.y) as f64;
        let steps = dx.abs().max(dy.abs()) as i32;

        let (x_inc, y_inc) = if steps > 0 {
            (dx / steps as f64, dy / steps as f64)
        } else {
            (0.0, 0.0)
        };

        Self {
            x: start.x as f64,
            y: start.y as f64,
            x_inc,
            y_inc,
            remaining: steps,
        }
    }
}

impl Iterator for DdaLine {
    type Item = GridCoord;

    fn next(&mut self) -> Option<GridCoord> {
        if self.remaining < 0 {
            return None;
        }
        let cell = GridCoord::new(self.x.round() as i32, self.y.round() as i32);
        self.x += self.x_inc;
        self.y += self.y_inc;
        self.remaining -= 1;
        Some(cell)
    }
}
