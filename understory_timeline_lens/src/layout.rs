// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::hash::Hash;

use kurbo::{BezPath, Point, Rect};

use crate::config::LensConfig;
use crate::event::EventIndex;
use crate::link::{Lanes, basis_path, link_points};
use crate::scale::Bar;
use crate::segment::{Emphasis, Segment};
use crate::timeline::Timeline;
use crate::transform::FocusTransform;

/// Remapped placement of one event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventLayout {
    /// Remapped bar.
    pub bar: Bar,
    /// Segment of the base bar's left edge.
    pub segment: Segment,
    /// Emphasis tier.
    pub emphasis: Emphasis,
    /// Opacity for the tier.
    pub opacity: f64,
}

impl EventLayout {
    /// The bar as a rectangle in lane `y` with height `bandwidth`.
    #[must_use]
    pub fn rect(&self, y: f64, bandwidth: f64) -> Rect {
        Rect::new(self.bar.x, y, self.bar.end(), y + bandwidth)
    }
}

/// Remapped path of one link.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkLayout {
    /// The four control points, source first.
    pub points: [Point; 4],
    /// Smoothed path through the control points.
    pub path: BezPath,
    /// Emphasis tier, taken from the source event.
    pub emphasis: Emphasis,
    /// Opacity for the tier.
    pub opacity: f64,
}

/// Everything a renderer needs for one focus position.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    transform: FocusTransform,
    events: Vec<EventLayout>,
    links: Vec<LinkLayout>,
}

impl Layout {
    /// Lays out every event and link of `timeline` under `transform`.
    ///
    /// `bars` are the base bars of `timeline`, in dataset order.
    #[must_use]
    pub fn compute<K>(
        timeline: &Timeline<K>,
        bars: &[Bar],
        transform: FocusTransform,
        lanes: &Lanes,
        config: &LensConfig,
    ) -> Self
    where
        K: Copy + Eq + Hash,
    {
        debug_assert_eq!(bars.len(), timeline.len(), "one bar per event");
        let events: Vec<EventLayout> = bars
            .iter()
            .map(|&bar| {
                let (bar, segment) = transform.remap_bar(bar);
                let emphasis = segment.emphasis();
                EventLayout {
                    bar,
                    segment,
                    emphasis,
                    opacity: config.emphasis.opacity(emphasis),
                }
            })
            .collect();

        let bandwidth = lanes.bandwidth();
        let links = timeline
            .links()
            .iter()
            .map(|link| {
                let src = &events[link.source.get()];
                let dst = &events[link.target.get()];
                let src_y = lanes.y(timeline.event(link.source).track);
                let dst_y = lanes.y(timeline.event(link.target).track);
                let points = link_points(
                    (src.bar, src_y),
                    (dst.bar, dst_y),
                    bandwidth,
                    link.kind,
                    &config.link,
                );
                LinkLayout {
                    points,
                    path: basis_path(&points),
                    // Source segment, so a source starting exactly at b3 is not full.
                    emphasis: src.emphasis,
                    opacity: src.opacity,
                }
            })
            .collect();

        Self {
            transform,
            events,
            links,
        }
    }

    /// The transform this layout was computed with.
    #[must_use]
    pub fn transform(&self) -> &FocusTransform {
        &self.transform
    }

    /// Event placements in dataset order.
    #[must_use]
    pub fn events(&self) -> &[EventLayout] {
        &self.events
    }

    /// Placement of the event at `index`.
    #[must_use]
    pub fn event(&self, index: EventIndex) -> &EventLayout {
        &self.events[index.get()]
    }

    /// Link paths in the timeline's link order.
    #[must_use]
    pub fn links(&self) -> &[LinkLayout] {
        &self.links
    }

    /// Remapped x of each tick event.
    pub fn tick_positions<'a>(
        &'a self,
        ticks: &'a [EventIndex],
    ) -> impl Iterator<Item = (EventIndex, f64)> + 'a {
        ticks.iter().map(|&i| (i, self.event(i).bar.x))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::Layout;
    use crate::classify::classify;
    use crate::config::LensConfig;
    use crate::event::{Event, EventIndex, Link, RelationKind};
    use crate::link::Lanes;
    use crate::scale::BaseScale;
    use crate::segment::{Emphasis, Segment};
    use crate::timeline::Timeline;
    use crate::transform::FocusTransform;

    fn timeline() -> Timeline<u32> {
        let events = (0..30)
            .map(|i| {
                let t = f64::from(i) * 12.0;
                Event::new(i, t, t + 10.0, (i % 3) as usize)
            })
            .collect();
        let links = vec![
            Link::new(14, 15, RelationKind::Inference),
            Link::new(20, 2, RelationKind::Conflict),
        ];
        Timeline::new(events, links).unwrap()
    }

    #[test]
    fn links_follow_their_source_emphasis() {
        let tl = timeline();
        let config = LensConfig::default()
            .with_diagram_width(358.0)
            .with_half_window(6.0);
        let scale = BaseScale::for_timeline(&tl, config.diagram_width);
        let bars = scale.bars(&tl);
        let buckets = classify(&bars, 175.0, config.half_window);
        let transform = FocusTransform::compute(
            &buckets,
            &bars,
            scale.diagram_length(),
            &config.scale,
        );
        let lanes = Lanes::new(3, 0.0..90.0);
        let layout = Layout::compute(&tl, &bars, transform, &lanes, &config);

        let src = layout.event(EventIndex::new(14));
        assert_eq!(src.segment, Segment::Window);
        assert_eq!(layout.links()[0].emphasis, Emphasis::Full);
        assert_eq!(layout.links()[0].opacity, 1.0);
        assert_eq!(layout.links()[1].emphasis, Emphasis::Hidden);
        assert_eq!(layout.links()[1].opacity, 0.0);

        // Conflict links anchor on the lane bottom.
        let conflict = &layout.links()[1];
        let lane_y = lanes.y(tl.event(EventIndex::new(20)).track);
        assert_eq!(conflict.points[0].y, lane_y + lanes.bandwidth());
    }

    #[test]
    fn identity_layout_keeps_base_bars() {
        let tl = timeline();
        let config = LensConfig::default();
        let scale = BaseScale::for_timeline(&tl, config.diagram_width);
        let bars = scale.bars(&tl);
        let lanes = Lanes::new(3, 0.0..90.0);
        let layout = Layout::compute(&tl, &bars, FocusTransform::identity(), &lanes, &config);
        let mapped: Vec<_> = layout.events().iter().map(|e| e.bar).collect();
        assert_eq!(mapped, bars);
        assert!(layout.events().iter().all(|e| e.emphasis == Emphasis::Full));
        let ticks = [EventIndex::new(0), EventIndex::new(5)];
        let xs: Vec<_> = layout.tick_positions(&ticks).map(|(_, x)| x).collect();
        assert_eq!(xs, [bars[0].x, bars[5].x]);

        let y = lanes.y(tl.event(EventIndex::new(5)).track);
        let rect = layout.event(EventIndex::new(5)).rect(y, lanes.bandwidth());
        assert_eq!((rect.x0, rect.x1), (bars[5].x, bars[5].end()));
        assert_eq!((rect.y0, rect.y1), (60.0, 90.0));
    }
}
