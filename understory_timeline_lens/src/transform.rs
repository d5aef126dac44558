// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus transform: a piecewise-linear remap of the x axis.
//!
//! Given the buckets for a focus, the transform picks six boundary coordinates
//! `b0..=b5` that delimit the five buckets. Each bucket segment is stretched by
//! its scale factor; the two remainders (`..b0` and `b5..`) are squeezed by a
//! shared anti-scale factor chosen so that the remapped axis ends exactly
//! where the base axis does.

use crate::classify::Buckets;
use crate::scale::Bar;
use crate::segment::Segment;

/// Magnification per bucket.
///
/// Only the ratios between factors and the diagram length matter. The lens
/// has to leave room for the remainder: when the magnified buckets together
/// are longer than the diagram, the anti-scale factor turns non-positive and
/// the remap stops being monotonic.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleFactors {
    /// Factor for the central bucket.
    pub window: f64,
    /// Factor for [`Segment::Left`] and [`Segment::Right`].
    pub adjacent: f64,
    /// Factor for [`Segment::FarLeft`] and [`Segment::FarRight`].
    pub far: f64,
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::from_window(8.0)
    }
}

impl ScaleFactors {
    /// Halves the factor once per step away from the window.
    #[must_use]
    pub fn from_window(window: f64) -> Self {
        Self {
            window,
            adjacent: window / 2.0,
            far: window / 4.0,
        }
    }

    /// Factor for a bucket segment, or `None` for [`Segment::Outside`].
    #[must_use]
    pub fn factor(&self, segment: Segment) -> Option<f64> {
        match segment {
            Segment::Window => Some(self.window),
            Segment::Left | Segment::Right => Some(self.adjacent),
            Segment::FarLeft | Segment::FarRight => Some(self.far),
            Segment::Outside => None,
        }
    }

    fn by_bucket(&self) -> [f64; 5] {
        Segment::BUCKETS.map(|s| self.factor(s).unwrap_or(1.0))
    }
}

/// Relative size below which the unscaled remainder counts as empty.
const REMAINDER_EPSILON: f64 = 1e-12;

/// The transform for one focus position.
///
/// A `FocusTransform` is a value: it is recomputed from scratch whenever the
/// window bucket changes and carries no state beyond its boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusTransform {
    original: [f64; 6],
    adapted: [f64; 6],
    factors: [f64; 5],
    anti_scale: f64,
    identity: bool,
}

impl FocusTransform {
    /// The transform used while the window is empty.
    ///
    /// Every coordinate maps to itself and reports [`Segment::Window`].
    #[must_use]
    pub fn identity() -> Self {
        Self {
            original: [0.0; 6],
            adapted: [0.0; 6],
            factors: [1.0; 5],
            anti_scale: 1.0,
            identity: true,
        }
    }

    /// Computes the transform for `buckets` over base `bars`.
    ///
    /// `diagram_length` is the base coordinate of the latest event end. When
    /// the window bucket is empty the result is [`FocusTransform::identity`].
    #[must_use]
    pub fn compute(
        buckets: &Buckets,
        bars: &[Bar],
        diagram_length: f64,
        scale: &ScaleFactors,
    ) -> Self {
        let Some(original) = boundaries(buckets, bars, diagram_length) else {
            log::trace!("focus window is empty; using identity transform");
            return Self::identity();
        };
        let factors = scale.by_bucket();

        let scaled_len: [f64; 5] =
            core::array::from_fn(|i| (original[i + 1] - original[i]) * factors[i]);
        let scaled_total: f64 = scaled_len.iter().sum();

        let unscaled_remainder = diagram_length - (original[5] - original[0]);
        let scaled_remainder = diagram_length - scaled_total;
        let anti_scale =
            if unscaled_remainder.abs() <= REMAINDER_EPSILON * diagram_length.abs().max(1.0) {
                1.0
            } else {
                scaled_remainder / unscaled_remainder
            };
        if anti_scale <= 0.0 {
            log::warn!(
                "magnified buckets ({scaled_total}) leave no room in a diagram of length \
                 {diagram_length}; anti-scale factor is {anti_scale}"
            );
        }

        let mut adapted = [0.0; 6];
        adapted[0] = original[0] * anti_scale;
        for i in 0..5 {
            adapted[i + 1] = adapted[i] + scaled_len[i];
        }

        log::trace!(
            "focus transform: original {original:?}, adapted {adapted:?}, anti-scale {anti_scale}"
        );

        Self {
            original,
            adapted,
            factors,
            anti_scale,
            identity: false,
        }
    }

    /// Returns `true` for the identity transform.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.identity
    }

    /// Boundaries `b0..=b5` in base coordinates.
    #[must_use]
    pub fn original_boundaries(&self) -> [f64; 6] {
        self.original
    }

    /// Boundaries `b0..=b5` after remapping.
    #[must_use]
    pub fn adapted_boundaries(&self) -> [f64; 6] {
        self.adapted
    }

    /// Factor applied to the remainder outside all buckets.
    #[must_use]
    pub fn anti_scale_factor(&self) -> f64 {
        self.anti_scale
    }

    /// Segment containing base coordinate `x`.
    ///
    /// Segments are half-open, `[b(i), b(i+1))`, so empty buckets never
    /// claim a coordinate.
    #[must_use]
    pub fn segment_at(&self, x: f64) -> Segment {
        self.piece(x).segment
    }

    /// Scale factor applied at base coordinate `x`.
    #[must_use]
    pub fn factor_at(&self, x: f64) -> f64 {
        self.piece(x).factor
    }

    /// Remaps a base coordinate.
    #[must_use]
    pub fn remap_x(&self, x: f64) -> f64 {
        let p = self.piece(x);
        p.adapted + (x - p.original) * p.factor
    }

    /// Remaps a bar by the factor of the segment its left edge lies in.
    ///
    /// The whole width is scaled by that one factor even if the bar extends
    /// into the next segment.
    #[must_use]
    pub fn remap_bar(&self, bar: Bar) -> (Bar, Segment) {
        let p = self.piece(bar.x);
        let x = p.adapted + (bar.x - p.original) * p.factor;
        (Bar::new(x, bar.width * p.factor), p.segment)
    }

    fn piece(&self, x: f64) -> Piece {
        if self.identity {
            return Piece {
                segment: Segment::Window,
                original: 0.0,
                adapted: 0.0,
                factor: 1.0,
            };
        }
        if x < self.original[0] {
            return Piece {
                segment: Segment::Outside,
                original: 0.0,
                adapted: 0.0,
                factor: self.anti_scale,
            };
        }
        for (i, segment) in Segment::BUCKETS.into_iter().enumerate() {
            if x < self.original[i + 1] {
                return Piece {
                    segment,
                    original: self.original[i],
                    adapted: self.adapted[i],
                    factor: self.factors[i],
                };
            }
        }
        Piece {
            segment: Segment::Outside,
            original: self.original[5],
            adapted: self.adapted[5],
            factor: self.anti_scale,
        }
    }
}

/// One linear piece of the remap: `x' = adapted + (x - original) * factor`.
#[derive(Clone, Copy, Debug)]
struct Piece {
    segment: Segment,
    original: f64,
    adapted: f64,
    factor: f64,
}

/// Picks `b0..=b5`, or `None` when the window bucket is empty.
///
/// Each bucket starts at its first event's start and `b5` is the end of the
/// last far-right event. An empty far bucket falls back to the dataset edge,
/// `0` or `diagram_length`. An empty adjacent bucket collapses onto the
/// boundary next to it, so it has zero length. Left boundaries never exceed
/// the window start and right boundaries never precede the one before them.
fn boundaries(buckets: &Buckets, bars: &[Bar], diagram_length: f64) -> Option<[f64; 6]> {
    let first_start = |s: Segment| buckets.get(s).first().map(|i| bars[i.get()].x);
    let last_end = |s: Segment| buckets.get(s).last().map(|i| bars[i.get()].end());

    let b2 = first_start(Segment::Window)?;
    let b1 = first_start(Segment::Left).unwrap_or(b2).min(b2);
    let b0 = first_start(Segment::FarLeft).unwrap_or(0.0).min(b1);

    let b5 = last_end(Segment::FarRight).unwrap_or(diagram_length);
    let b4 = first_start(Segment::FarRight).unwrap_or(b5);
    let b3 = first_start(Segment::Right).unwrap_or(b4).max(b2);
    let b4 = b4.max(b3);
    let b5 = b5.max(b4);

    Some([b0, b1, b2, b3, b4, b5])
}
