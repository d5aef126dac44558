// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::hash::Hash;
use core::ops::Range;

use crate::event::Event;
use crate::timeline::Timeline;

/// Horizontal extent of an event in base (unmagnified) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bar {
    /// Left edge.
    pub x: f64,
    /// Width, never negative for bars produced by [`BaseScale`].
    pub width: f64,
}

impl Bar {
    /// Creates a bar from its left edge and width.
    #[must_use]
    pub fn new(x: f64, width: f64) -> Self {
        Self { x, width }
    }

    /// Right edge, `x + width`.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.x + self.width
    }
}

/// Affine projection from time onto `0..width`.
///
/// `BaseScale` is the unmagnified x axis every focus transform is expressed
/// against. It is built once per dataset and never changes with the focus.
/// The mapping is linear so that segment lengths add up; the lens relies on
/// that when it redistributes space.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseScale {
    domain: Range<f64>,
    width: f64,
    k: f64,
}

impl BaseScale {
    /// Creates a scale mapping `domain.start → 0` and `domain.end → width`.
    ///
    /// A zero-length domain (a single instantaneous event) maps every time
    /// to `0`.
    #[must_use]
    pub fn new(domain: Range<f64>, width: f64) -> Self {
        let span = domain.end - domain.start;
        let k = if span > 0.0 { width / span } else { 0.0 };
        Self { domain, width, k }
    }

    /// Creates a scale over the full time range of `timeline`.
    #[must_use]
    pub fn for_timeline<K>(timeline: &Timeline<K>, width: f64) -> Self
    where
        K: Copy + Eq + Hash,
    {
        Self::new(timeline.time_range(), width)
    }

    /// The time domain.
    #[must_use]
    pub fn domain(&self) -> Range<f64> {
        self.domain.clone()
    }

    /// The requested range width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Base coordinate of the domain end.
    ///
    /// Equal to [`BaseScale::width`] except for a zero-length domain, where it
    /// is `0`.
    #[must_use]
    pub fn diagram_length(&self) -> f64 {
        self.x(self.domain.end)
    }

    /// Maps a time to a base coordinate.
    #[must_use]
    pub fn x(&self, t: f64) -> f64 {
        (t - self.domain.start) * self.k
    }

    /// Maps a base coordinate back to a time.
    ///
    /// For a zero-length domain this returns `domain.start`.
    #[must_use]
    pub fn invert(&self, x: f64) -> f64 {
        if self.k == 0.0 {
            return self.domain.start;
        }
        self.domain.start + x / self.k
    }

    /// Base bar for a single event.
    #[must_use]
    pub fn bar<K>(&self, event: &Event<K>) -> Bar {
        let x = self.x(event.start);
        Bar::new(x, self.x(event.end) - x)
    }

    /// Base bars for every event of `timeline`, in dataset order.
    #[must_use]
    pub fn bars<K>(&self, timeline: &Timeline<K>) -> Vec<Bar>
    where
        K: Copy + Eq + Hash,
    {
        timeline.events().iter().map(|e| self.bar(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Bar, BaseScale};
    use crate::event::Event;

    #[test]
    fn maps_domain_onto_width() {
        let s = BaseScale::new(100.0..200.0, 500.0);
        assert!((s.x(100.0) - 0.0).abs() < 1e-9);
        assert!((s.x(200.0) - 500.0).abs() < 1e-9);
        assert!((s.x(150.0) - 250.0).abs() < 1e-9);
        assert!((s.diagram_length() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn invert_roundtrips() {
        let s = BaseScale::new(-3.0..9.0, 1200.0);
        let t = 4.25;
        assert!((s.invert(s.x(t)) - t).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_collapses_to_zero() {
        let s = BaseScale::new(5.0..5.0, 800.0);
        assert_eq!(s.x(5.0), 0.0);
        assert_eq!(s.x(50.0), 0.0);
        assert_eq!(s.invert(123.0), 5.0);
        assert_eq!(s.diagram_length(), 0.0);
    }

    #[test]
    fn bar_spans_event() {
        let s = BaseScale::new(0.0..10.0, 100.0);
        let bar = s.bar(&Event::new((), 2.0, 5.0, 0));
        assert_eq!(bar, Bar::new(20.0, 30.0));
        assert!((bar.end() - 50.0).abs() < 1e-9);
    }
}
