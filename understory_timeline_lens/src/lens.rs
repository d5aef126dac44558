// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::hash::Hash;
use core::ops::Range;

use crate::classify::{Buckets, classify};
use crate::config::{ConfigError, LensConfig};
use crate::continuity::should_recompute;
use crate::event::EventIndex;
use crate::layout::Layout;
use crate::link::Lanes;
use crate::scale::{Bar, BaseScale};
use crate::ticks::tick_events;
use crate::timeline::Timeline;
use crate::transform::FocusTransform;

/// Result of moving the focus.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusUpdate {
    /// The focus after clamping.
    pub focus: f64,
    /// Extent of the window indicator, `focus - half_window..focus + half_window`.
    pub window: Range<f64>,
    /// Buckets for the new focus.
    pub buckets: Buckets,
    /// New layout, or `None` when the window bucket kept its endpoints and the
    /// previous layout is still current.
    pub layout: Option<Layout>,
}

impl FocusUpdate {
    /// Returns `true` when a new layout was computed.
    #[must_use]
    pub fn recomputed(&self) -> bool {
        self.layout.is_some()
    }
}

/// A focus + context session over one dataset.
///
/// The lens owns the dataset and everything derived from it at load time:
/// the base scale, the base bars and the tick events. Across focus updates
/// it only remembers the focus and the last window bucket a layout was
/// computed for; buckets, transforms and layouts are returned by value.
///
/// ```rust
/// use understory_timeline_lens::{Event, FocusLens, Lanes, LensConfig, Timeline};
///
/// let events = (0..50)
///     .map(|i| Event::new(i, f64::from(i) * 12.0, f64::from(i) * 12.0 + 10.0, 0))
///     .collect();
/// let timeline = Timeline::new(events, Vec::new()).unwrap();
/// let config = LensConfig::default()
///     .with_diagram_width(1_200.0)
///     .with_half_window(20.0);
/// let mut lens = FocusLens::new(timeline, config, Lanes::new(1, 0.0..40.0)).unwrap();
///
/// let first = lens.update(600.0);
/// assert!(first.recomputed());
///
/// // A one-pixel nudge keeps the same window bucket.
/// let nudge = lens.update(601.0);
/// assert!(!nudge.recomputed());
/// assert_eq!(nudge.focus, 601.0);
/// ```
#[derive(Clone, Debug)]
pub struct FocusLens<K>
where
    K: Copy + Eq + Hash,
{
    timeline: Timeline<K>,
    config: LensConfig,
    lanes: Lanes,
    scale: BaseScale,
    bars: Vec<Bar>,
    ticks: Vec<EventIndex>,
    focus: Option<f64>,
    previous_window: Option<Vec<EventIndex>>,
}

impl<K> FocusLens<K>
where
    K: Copy + Eq + Hash,
{
    /// Builds a session for `timeline`.
    pub fn new(
        timeline: Timeline<K>,
        config: LensConfig,
        lanes: Lanes,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let scale = BaseScale::for_timeline(&timeline, config.diagram_width);
        let bars = scale.bars(&timeline);
        let ticks = tick_events(&bars, config.tick_spacing * config.half_window);
        log::debug!(
            "focus lens over {} events, {} links, {} ticks",
            timeline.len(),
            timeline.links().len(),
            ticks.len()
        );
        Ok(Self {
            timeline,
            config,
            lanes,
            scale,
            bars,
            ticks,
            focus: None,
            previous_window: None,
        })
    }

    /// The dataset.
    #[must_use]
    pub fn timeline(&self) -> &Timeline<K> {
        &self.timeline
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &LensConfig {
        &self.config
    }

    /// The base scale.
    #[must_use]
    pub fn scale(&self) -> &BaseScale {
        &self.scale
    }

    /// Base bars in dataset order.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Events that carry an axis tick.
    #[must_use]
    pub fn ticks(&self) -> &[EventIndex] {
        &self.ticks
    }

    /// The last focus passed to [`FocusLens::update`], after clamping.
    #[must_use]
    pub fn focus(&self) -> Option<f64> {
        self.focus
    }

    /// Replaces the lane geometry used for link paths.
    pub fn set_lanes(&mut self, lanes: Lanes) {
        self.lanes = lanes;
    }

    /// Clamps `focus` into the range the window may occupy.
    #[must_use]
    pub fn clamp_focus(&self, focus: f64) -> f64 {
        self.config.clamp_focus(focus)
    }

    /// Focus coordinate for a playback time.
    #[must_use]
    pub fn focus_for_time(&self, t: f64) -> f64 {
        self.clamp_focus(self.scale.x(t))
    }

    /// Playback time under a focus coordinate.
    #[must_use]
    pub fn time_for_focus(&self, focus: f64) -> f64 {
        self.scale.invert(focus)
    }

    /// Moves the focus and returns the new buckets, plus a layout when the
    /// window bucket changed.
    ///
    /// The focus itself always moves; only the layout is skipped when the
    /// window still starts and ends with the same events.
    pub fn update(&mut self, focus: f64) -> FocusUpdate {
        let focus = self.clamp_focus(focus);
        self.focus = Some(focus);
        let h = self.config.half_window;
        let buckets = classify(&self.bars, focus, h);

        let layout = if should_recompute(self.previous_window.as_deref(), buckets.window()) {
            log::debug!(
                "focus {focus}: window holds {} events, recomputing",
                buckets.window().len()
            );
            let layout = self.layout_for(&buckets);
            self.previous_window = Some(buckets.window().to_vec());
            Some(layout)
        } else {
            log::debug!("focus {focus}: window endpoints unchanged, keeping layout");
            None
        };

        FocusUpdate {
            focus,
            window: focus - h..focus + h,
            buckets,
            layout,
        }
    }

    /// Computes the layout for the current focus regardless of continuity.
    ///
    /// Without a prior [`FocusLens::update`] this is the identity layout.
    #[must_use]
    pub fn layout(&self) -> Layout {
        match self.focus {
            Some(focus) => {
                let buckets = classify(&self.bars, focus, self.config.half_window);
                self.layout_for(&buckets)
            }
            None => self.layout_with(FocusTransform::identity()),
        }
    }

    /// Forgets the remembered window so the next update recomputes.
    pub fn reset(&mut self) {
        self.previous_window = None;
    }

    fn layout_for(&self, buckets: &Buckets) -> Layout {
        let transform = FocusTransform::compute(
            buckets,
            &self.bars,
            self.scale.diagram_length(),
            &self.config.scale,
        );
        self.layout_with(transform)
    }

    fn layout_with(&self, transform: FocusTransform) -> Layout {
        Layout::compute(&self.timeline, &self.bars, transform, &self.lanes, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::FocusLens;
    use crate::config::{ConfigError, LensConfig};
    use crate::event::{Event, Link, RelationKind};
    use crate::link::Lanes;
    use crate::timeline::Timeline;

    fn lens() -> FocusLens<u32> {
        let events = (0..50)
            .map(|i| {
                let t = f64::from(i) * 12.0;
                Event::new(i, t, t + 10.0, 0)
            })
            .collect();
        let timeline = Timeline::new(events, Vec::new()).unwrap();
        let config = LensConfig::default()
            .with_diagram_width(598.0)
            .with_half_window(10.0);
        FocusLens::new(timeline, config, Lanes::new(1, 0.0..20.0)).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let timeline =
            Timeline::new(alloc::vec![Event::new(0, 0.0, 1.0, 0)], Vec::new()).unwrap();
        let err = FocusLens::new(
            timeline,
            LensConfig::default().with_half_window(-1.0),
            Lanes::new(1, 0.0..1.0),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::HalfWindow(-1.0));
    }

    #[test]
    fn focus_is_clamped_before_classifying() {
        let mut l = lens();
        assert_eq!(l.update(-1_000.0).focus, -20.0);
        assert_eq!(l.update(10_000.0).focus, 588.0);
        assert_eq!(l.focus(), Some(588.0));
        let u = l.update(300.0);
        assert_eq!(u.window, 290.0..310.0);
    }

    #[test]
    fn update_short_circuits_on_unchanged_window() {
        let mut l = lens();
        let a = l.update(300.0);
        assert!(a.recomputed());
        let b = l.update(301.0);
        assert_eq!(a.buckets.window(), b.buckets.window());
        assert!(!b.recomputed());

        l.reset();
        assert!(l.update(301.0).recomputed());
    }

    #[test]
    fn forced_layout_matches_update_layout() {
        let mut l = lens();
        let u = l.update(123.0);
        assert_eq!(u.layout.as_ref(), Some(&l.layout()));
    }

    #[test]
    fn new_lanes_move_link_paths() {
        let events = alloc::vec![Event::new(0, 0.0, 10.0, 0), Event::new(1, 12.0, 22.0, 1)];
        let links = alloc::vec![Link::new(1, 0, RelationKind::Inference)];
        let timeline = Timeline::new(events, links).unwrap();
        let config = LensConfig::default()
            .with_diagram_width(100.0)
            .with_half_window(5.0);
        let mut l = FocusLens::new(timeline, config, Lanes::new(2, 0.0..20.0)).unwrap();
        l.update(50.0);
        let before = l.layout().links()[0].points;

        l.set_lanes(Lanes::new(2, 0.0..20.0).bottom_up());
        let after = l.layout().links()[0].points;
        assert_eq!(before[0].y, 10.0);
        assert_eq!(after[0].y, 0.0);
        assert_eq!(before[0].x, after[0].x);
    }

    #[test]
    fn playback_time_maps_to_focus() {
        let l = lens();
        let x = l.focus_for_time(240.0);
        assert!((x - 240.0).abs() < 1e-9);
        assert!((l.time_for_focus(x) - 240.0).abs() < 1e-9);
        assert_eq!(l.focus_for_time(10_000.0), 588.0);
    }
}
