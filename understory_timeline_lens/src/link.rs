// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lane geometry and link paths.
//!
//! A link leaves the middle of its source bar, rises by a fixed offset,
//! bridges horizontally to the target's middle and drops back onto the target
//! bar. Conflict links mirror this below the lane. The four control points are
//! joined with a uniform cubic B-spline, so the path passes through the first
//! and last point and is smoothed in between.

use core::ops::Range;

use kurbo::{BezPath, Point};

use crate::event::RelationKind;
use crate::scale::Bar;

/// Vertical offsets for link paths.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkStyle {
    /// How far above the lane top a regular link arcs.
    pub rise: f64,
    /// How far below the lane bottom a conflict link arcs.
    pub conflict_drop: f64,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            rise: 10.0,
            conflict_drop: 15.0,
        }
    }
}

/// Evenly banded vertical lanes, one per track.
///
/// Bands share `range` with `padding` (a fraction of one step) between and
/// around them. With [`Lanes::bottom_up`] track `0` is the lowest lane.
#[derive(Clone, Debug, PartialEq)]
pub struct Lanes {
    count: usize,
    range: Range<f64>,
    padding: f64,
    bottom_up: bool,
}

impl Lanes {
    /// Creates `count` top-down lanes over `range` with no padding.
    #[must_use]
    pub fn new(count: usize, range: Range<f64>) -> Self {
        Self {
            count,
            range,
            padding: 0.0,
            bottom_up: false,
        }
    }

    /// Sets inner and outer padding as a fraction of the step, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.clamp(0.0, 1.0);
        self
    }

    /// Stacks lanes from the bottom of the range upwards.
    #[must_use]
    pub fn bottom_up(mut self) -> Self {
        self.bottom_up = true;
        self
    }

    /// Number of lanes.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    fn step(&self) -> f64 {
        let n = self.count as f64;
        (self.range.end - self.range.start) / (n + self.padding).max(1.0)
    }

    /// Height of one lane.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Top edge of the lane for `track`.
    #[must_use]
    pub fn y(&self, track: usize) -> f64 {
        let step = self.step();
        let n = self.count as f64;
        let span = self.range.end - self.range.start;
        let start = self.range.start + (span - step * (n - self.padding)) * 0.5;
        let slot = if self.bottom_up {
            self.count.saturating_sub(1).saturating_sub(track)
        } else {
            track
        };
        start + step * slot as f64
    }
}

/// The four control points of a link between two remapped bars.
#[must_use]
pub fn link_points(
    source: (Bar, f64),
    target: (Bar, f64),
    bandwidth: f64,
    kind: RelationKind,
    style: &LinkStyle,
) -> [Point; 4] {
    let (anchor, arc) = if kind.is_conflict() {
        (bandwidth, bandwidth + style.conflict_drop)
    } else {
        (0.0, -style.rise)
    };
    let (src, src_y) = source;
    let (dst, dst_y) = target;
    let src_x = src.x + src.width / 2.0;
    let dst_x = dst.x + dst.width / 2.0;
    [
        Point::new(src_x, src_y + anchor),
        Point::new(src_x, src_y + arc),
        Point::new(dst_x, dst_y + arc),
        Point::new(dst_x, dst_y + anchor),
    ]
}

/// Joins `points` with a uniform cubic B-spline.
///
/// The path starts at the first point, ends at the last, and uses the
/// interior points as spline control points. Two points give a straight line.
#[must_use]
pub fn basis_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let [first, rest @ ..] = points else {
        return path;
    };
    path.move_to(*first);
    match rest {
        [] => return path,
        [only] => {
            path.line_to(*only);
            return path;
        }
        _ => {}
    }

    let (mut p0, mut p1) = (points[0], points[1]);
    path.line_to(p0.lerp(p1, 1.0 / 6.0));
    for &p in &points[2..] {
        basis_segment(&mut path, p0, p1, p);
        p0 = p1;
        p1 = p;
    }
    basis_segment(&mut path, p0, p1, p1);
    path.line_to(p1);
    path
}

fn basis_segment(path: &mut BezPath, p0: Point, p1: Point, p: Point) {
    path.curve_to(
        p0.lerp(p1, 1.0 / 3.0),
        p0.lerp(p1, 2.0 / 3.0),
        Point::new(
            (p0.x + 4.0 * p1.x + p.x) / 6.0,
            (p0.y + 4.0 * p1.y + p.y) / 6.0,
        ),
    );
}

#[cfg(test)]
mod tests {
    use kurbo::{PathEl, Point};

    use super::{Lanes, LinkStyle, basis_path, link_points};
    use crate::event::RelationKind;
    use crate::scale::Bar;

    #[test]
    fn lanes_without_padding_tile_the_range() {
        let lanes = Lanes::new(4, 0.0..100.0);
        assert_eq!(lanes.count(), 4);
        assert_eq!(lanes.bandwidth(), 25.0);
        assert_eq!(lanes.y(0), 0.0);
        assert_eq!(lanes.y(3), 75.0);
    }

    #[test]
    fn bottom_up_lanes_reverse_order() {
        let lanes = Lanes::new(2, 0.0..100.0).with_padding(0.1).bottom_up();
        assert!(lanes.y(0) > lanes.y(1));
        let step = 100.0 / 2.1;
        assert!((lanes.bandwidth() - step * 0.9).abs() < 1e-9);
        assert!((lanes.y(1) - step * 0.1).abs() < 1e-9);
    }

    #[test]
    fn regular_links_arc_above_and_conflicts_below() {
        let style = LinkStyle::default();
        let src = (Bar::new(0.0, 10.0), 50.0);
        let dst = (Bar::new(100.0, 20.0), 20.0);

        let up = link_points(src, dst, 8.0, RelationKind::Inference, &style);
        assert_eq!(up[0], Point::new(5.0, 50.0));
        assert_eq!(up[1], Point::new(5.0, 40.0));
        assert_eq!(up[2], Point::new(110.0, 10.0));
        assert_eq!(up[3], Point::new(110.0, 20.0));

        let down = link_points(src, dst, 8.0, RelationKind::Conflict, &style);
        assert_eq!(down[0], Point::new(5.0, 58.0));
        assert_eq!(down[1], Point::new(5.0, 73.0));
        assert_eq!(down[3], Point::new(110.0, 28.0));
    }

    #[test]
    fn basis_path_runs_from_first_to_last_point() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(0.0, -10.0),
            Point::new(60.0, -10.0),
            Point::new(60.0, 0.0),
        ];
        let path = basis_path(&pts);
        let els = path.elements();
        assert_eq!(els.first(), Some(&PathEl::MoveTo(pts[0])));
        assert_eq!(els.last(), Some(&PathEl::LineTo(pts[3])));
        let curves = els
            .iter()
            .filter(|el| matches!(el, PathEl::CurveTo(..)))
            .count();
        assert_eq!(curves, 3);
    }

    #[test]
    fn short_inputs_degrade_gracefully() {
        assert!(basis_path(&[]).elements().is_empty());
        assert_eq!(basis_path(&[Point::ORIGIN]).elements().len(), 1);
        let line = basis_path(&[Point::ORIGIN, Point::new(3.0, 4.0)]);
        assert_eq!(line.elements()[1], PathEl::LineTo(Point::new(3.0, 4.0)));
    }
}
