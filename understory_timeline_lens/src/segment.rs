// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position buckets around the focus and the emphasis derived from them.

use crate::scale::Bar;

/// Where an event sits relative to the focus window.
///
/// The five named segments are ordered left to right; `Outside` covers
/// everything farther than three half-windows from the focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Between two and three half-windows left of the focus.
    FarLeft,
    /// Between one and two half-windows left of the focus.
    Left,
    /// Overlapping the central window.
    Window,
    /// Between one and two half-windows right of the focus.
    Right,
    /// Between two and three half-windows right of the focus.
    FarRight,
    /// Not in any bucket.
    Outside,
}

impl Segment {
    /// The five buckets in left-to-right order.
    pub const BUCKETS: [Self; 5] = [
        Self::FarLeft,
        Self::Left,
        Self::Window,
        Self::Right,
        Self::FarRight,
    ];

    /// First-match order used by [`classify`](crate::classify).
    ///
    /// `Outside` is last and admits anything.
    pub const CLASSIFY_ORDER: [Self; 6] = [
        Self::Window,
        Self::FarLeft,
        Self::Left,
        Self::Right,
        Self::FarRight,
        Self::Outside,
    ];

    /// Returns `true` if `bar` satisfies this segment's interval test for a
    /// window centered at `focus`.
    ///
    /// The tests are only meaningful in [`Segment::CLASSIFY_ORDER`]: later
    /// segments assume the bar fell through the earlier ones.
    #[must_use]
    pub fn admits(self, bar: Bar, focus: f64, half_window: f64) -> bool {
        let (x, end) = (bar.x, bar.end());
        let h = half_window;
        match self {
            Self::Window => x <= focus + h && end >= focus - h,
            Self::FarLeft => end >= focus - 3.0 * h && x < focus - 2.0 * h,
            Self::Left => end >= focus - 2.0 * h && x < focus - h,
            Self::Right => x < focus + 2.0 * h && end >= focus + h,
            Self::FarRight => x < focus + 3.0 * h && end >= focus + 2.0 * h,
            Self::Outside => true,
        }
    }

    /// Position of this segment in [`Segment::BUCKETS`], or `None` for `Outside`.
    #[must_use]
    pub fn bucket_index(self) -> Option<usize> {
        match self {
            Self::FarLeft => Some(0),
            Self::Left => Some(1),
            Self::Window => Some(2),
            Self::Right => Some(3),
            Self::FarRight => Some(4),
            Self::Outside => None,
        }
    }

    /// Emphasis tier; the adjacent buckets share one tier, as do the far ones.
    #[must_use]
    pub fn emphasis(self) -> Emphasis {
        match self {
            Self::Window => Emphasis::Full,
            Self::Left | Self::Right => Emphasis::Adjacent,
            Self::FarLeft | Self::FarRight => Emphasis::Far,
            Self::Outside => Emphasis::Hidden,
        }
    }
}

/// Visual emphasis tier the renderer applies to events and links.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Emphasis {
    /// Inside the window.
    Full,
    /// Next to the window.
    Adjacent,
    /// In the outer buckets.
    Far,
    /// Outside every bucket.
    Hidden,
}

/// Opacity per [`Emphasis`] tier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmphasisLevels {
    /// Opacity for [`Emphasis::Full`].
    pub full: f64,
    /// Opacity for [`Emphasis::Adjacent`].
    pub adjacent: f64,
    /// Opacity for [`Emphasis::Far`].
    pub far: f64,
    /// Opacity for [`Emphasis::Hidden`].
    pub hidden: f64,
}

impl Default for EmphasisLevels {
    fn default() -> Self {
        Self {
            full: 1.0,
            adjacent: 0.3,
            far: 0.15,
            hidden: 0.0,
        }
    }
}

impl EmphasisLevels {
    /// Returns the opacity configured for `emphasis`.
    #[must_use]
    pub fn opacity(&self, emphasis: Emphasis) -> f64 {
        match emphasis {
            Emphasis::Full => self.full,
            Emphasis::Adjacent => self.adjacent,
            Emphasis::Far => self.far,
            Emphasis::Hidden => self.hidden,
        }
    }

    pub(crate) fn values(&self) -> [f64; 4] {
        [self.full, self.adjacent, self.far, self.hidden]
    }
}
