// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::link::LinkStyle;
use crate::segment::EmphasisLevels;
use crate::transform::ScaleFactors;

/// Error returned by [`LensConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `diagram_width` is not finite and positive.
    DiagramWidth(f64),
    /// `half_window` is not finite and positive.
    HalfWindow(f64),
    /// A scale factor is not finite and positive.
    ScaleFactor(f64),
    /// An opacity is outside `[0, 1]`.
    Opacity(f64),
    /// `tick_spacing` is negative or not finite.
    TickSpacing(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiagramWidth(v) => write!(f, "diagram width must be positive, got {v}"),
            Self::HalfWindow(v) => write!(f, "half window must be positive, got {v}"),
            Self::ScaleFactor(v) => write!(f, "scale factors must be positive, got {v}"),
            Self::Opacity(v) => write!(f, "opacity must lie in [0, 1], got {v}"),
            Self::TickSpacing(v) => write!(f, "tick spacing must be non-negative, got {v}"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Configuration for a [`FocusLens`](crate::FocusLens).
///
/// All lengths are in base coordinates, i.e. the same space as
/// `0..diagram_width`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LensConfig {
    /// Width of the base axis.
    pub diagram_width: f64,
    /// Half the width of the central window.
    pub half_window: f64,
    /// Magnification per bucket.
    pub scale: ScaleFactors,
    /// Opacity per emphasis tier.
    pub emphasis: EmphasisLevels,
    /// Link path offsets.
    pub link: LinkStyle,
    /// Minimum gap between ticks, in half-windows.
    pub tick_spacing: f64,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            diagram_width: 1000.0,
            half_window: 30.0,
            scale: ScaleFactors::default(),
            emphasis: EmphasisLevels::default(),
            link: LinkStyle::default(),
            tick_spacing: 2.5,
        }
    }
}

impl LensConfig {
    /// Sets the base axis width.
    #[must_use]
    pub fn with_diagram_width(mut self, width: f64) -> Self {
        self.diagram_width = width;
        self
    }

    /// Sets the half window.
    #[must_use]
    pub fn with_half_window(mut self, half_window: f64) -> Self {
        self.half_window = half_window;
        self
    }

    /// Sets the bucket scale factors.
    #[must_use]
    pub fn with_scale(mut self, scale: ScaleFactors) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the emphasis opacities.
    #[must_use]
    pub fn with_emphasis(mut self, emphasis: EmphasisLevels) -> Self {
        self.emphasis = emphasis;
        self
    }

    /// Sets the link path offsets.
    #[must_use]
    pub fn with_link_style(mut self, link: LinkStyle) -> Self {
        self.link = link;
        self
    }

    /// Sets the minimum tick gap, in half-windows.
    #[must_use]
    pub fn with_tick_spacing(mut self, spacing: f64) -> Self {
        self.tick_spacing = spacing;
        self
    }

    /// Checks the invariants the lens arithmetic relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.diagram_width) {
            return Err(ConfigError::DiagramWidth(self.diagram_width));
        }
        if !positive(self.half_window) {
            return Err(ConfigError::HalfWindow(self.half_window));
        }
        for f in [self.scale.window, self.scale.adjacent, self.scale.far] {
            if !positive(f) {
                return Err(ConfigError::ScaleFactor(f));
            }
        }
        for o in self.emphasis.values() {
            if !(0.0..=1.0).contains(&o) {
                return Err(ConfigError::Opacity(o));
            }
        }
        if !self.tick_spacing.is_finite() || self.tick_spacing < 0.0 {
            return Err(ConfigError::TickSpacing(self.tick_spacing));
        }
        Ok(())
    }

    /// Returns the focus range `[-2 * half_window, diagram_width - half_window]`.
    ///
    /// The window may hang off the left edge but never walks past the right.
    #[must_use]
    pub fn focus_range(&self) -> (f64, f64) {
        (
            -2.0 * self.half_window,
            self.diagram_width - self.half_window,
        )
    }

    /// Clamps `focus` into [`LensConfig::focus_range`].
    #[must_use]
    pub fn clamp_focus(&self, focus: f64) -> f64 {
        let (lo, hi) = self.focus_range();
        focus.max(lo).min(hi)
    }
}
