//! Isoline extraction with marching squares.
//!
//! Segments are expressed in fractional grid index space: `x` runs along
//! columns (longitude), `y` along rows (latitude).

use crate::grid::Grid;

/// A point in fractional (col, row) index space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Marching squares for a single level. Cells touching NaN are skipped.
pub fn isolines(grid: &Grid, level: f64) -> Vec<Segment> {
    let (rows, cols) = grid.shape();
    if rows < 2 || cols < 2 {
        return vec![];
    }

    let mut segments = Vec::new();
    for y in 0..rows - 1 {
        for x in 0..cols - 1 {
            let tl = grid.get(y, x);
            let tr = grid.get(y, x + 1);
            let bl = grid.get(y + 1, x);
            let br = grid.get(y + 1, x + 1);

            if tl.is_nan() || tr.is_nan() || bl.is_nan() || br.is_nan() {
                continue;
            }

            let mut case = 0u8;
            if tl >= level { case |= 1; }
            if tr >= level { case |= 2; }
            if br >= level { case |= 4; }
            if bl >= level { case |= 8; }

            cell_segments(case, x as f64, y as f64, [tl, tr, br, bl], level, &mut segments);
        }
    }
    segments
}

fn cell_segments(case: u8, x: f64, y: f64, corners: [f64; 4], level: f64, out: &mut Vec<Segment>) {
    let [tl, tr, br, bl] = corners;
    let top = || interpolate_edge(Point::new(x, y), Point::new(x + 1.0, y), tl, tr, level);
    let right = || interpolate_edge(Point::new(x + 1.0, y), Point::new(x + 1.0, y + 1.0), tr, br, level);
    let bottom = || interpolate_edge(Point::new(x, y + 1.0), Point::new(x + 1.0, y + 1.0), bl, br, level);
    let left = || interpolate_edge(Point::new(x, y), Point::new(x, y + 1.0), tl, bl, level);
    let mut push = |start: Point, end: Point| out.push(Segment { start, end });

    match case {
        0 | 15 => {}
        1 | 14 => push(left(), top()),
        2 | 13 => push(top(), right()),
        3 | 12 => push(left(), right()),
        4 | 11 => push(right(), bottom()),
        6 | 9 => push(top(), bottom()),
        7 | 8 => push(left(), bottom()),
        // Saddles: resolve with the cell centre average.
        5 | 10 => {
            let centre_high = (tl + tr + br + bl) / 4.0 >= level;
            if (case == 5) == centre_high {
                push(left(), bottom());
                push(top(), right());
            } else {
                push(left(), top());
                push(right(), bottom());
            }
        }
        _ => unreachable!("marching squares case is 4 bits"),
    }
}

fn interpolate_edge(a: Point, b: Point, va: f64, vb: f64, level: f64) -> Point {
    if (vb - va).abs() < 1e-12 {
        return Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    }
    let t = ((level - va) / (vb - va)).clamp(0.0, 1.0);
    Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn flat_grid_has_no_isolines() {
        let g = Grid::new(3, 3, 1.0);
        assert!(isolines(&g, 0.5).is_empty());
        assert!(isolines(&g, 2.0).is_empty());
    }

    #[test]
    fn vertical_ramp_gives_vertical_line() {
        // Values rise with column: 0, 1, 2.
        let g = Grid::from_fn(3, 3, |_, c| c as f64);
        let segs = isolines(&g, 1.5);
        assert_eq!(segs.len(), 2);
        for s in &segs {
            assert_relative_eq!(s.start.x, 1.5);
            assert_relative_eq!(s.end.x, 1.5);
        }
    }

    #[test]
    fn single_peak_is_enclosed() {
        let mut g = Grid::new(3, 3, 0.0);
        g.set(1, 1, 1.0);
        let segs = isolines(&g, 0.5);
        assert_eq!(segs.len(), 4);
        for s in &segs {
            for p in [s.start, s.end] {
                let d = ((p.x - 1.0).powi(2) + (p.y - 1.0).powi(2)).sqrt();
                assert_relative_eq!(d, 0.5, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn saddle_emits_two_segments() {
        let mut g = Grid::new(2, 2, 0.0);
        g.set(0, 0, 1.0);
        g.set(1, 1, 1.0);
        assert_eq!(isolines(&g, 0.5).len(), 2);
    }

    #[test]
    fn nan_cells_are_skipped() {
        let mut g = Grid::from_fn(2, 2, |_, c| c as f64);
        g.set(0, 0, f64::NAN);
        assert!(isolines(&g, 0.5).is_empty());
    }
}
