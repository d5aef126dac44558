// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window classification: partition events into buckets around the focus.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::event::EventIndex;
use crate::scale::Bar;
use crate::segment::Segment;

/// The five disjoint buckets produced by [`classify`].
///
/// Each bucket keeps dataset order. Every event also has a recorded
/// [`Segment`], so links can derive their emphasis from their endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buckets {
    buckets: [Vec<EventIndex>; 5],
    membership: Vec<Segment>,
}

impl Buckets {
    /// Events of `segment`, in dataset order. Empty for [`Segment::Outside`].
    #[must_use]
    pub fn get(&self, segment: Segment) -> &[EventIndex] {
        match segment.bucket_index() {
            Some(i) => &self.buckets[i],
            None => &[],
        }
    }

    /// The central bucket.
    #[must_use]
    pub fn window(&self) -> &[EventIndex] {
        self.get(Segment::Window)
    }

    /// Bucket of the event at `index`.
    #[must_use]
    pub fn segment_of(&self, index: EventIndex) -> Segment {
        self.membership
            .get(index.get())
            .copied()
            .unwrap_or(Segment::Outside)
    }

    /// Per-event membership in dataset order.
    #[must_use]
    pub fn membership(&self) -> &[Segment] {
        &self.membership
    }

    /// Number of classified events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Returns `true` when no event fell into any bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Events whose text should be listed for the current focus.
    ///
    /// That is the window bucket, or every event when the window is empty.
    #[must_use]
    pub fn transcript(&self) -> Cow<'_, [EventIndex]> {
        if self.window().is_empty() {
            (0_u32..)
                .take(self.membership.len())
                .map(EventIndex::new)
                .collect()
        } else {
            Cow::Borrowed(self.window())
        }
    }
}

/// Partitions `bars` into buckets around `focus`.
///
/// Each bar is tested against [`Segment::CLASSIFY_ORDER`] and lands in the
/// first segment whose interval test it satisfies. Bars farther than three
/// half-windows from the focus are [`Segment::Outside`].
#[must_use]
pub fn classify(bars: &[Bar], focus: f64, half_window: f64) -> Buckets {
    debug_assert!(half_window > 0.0, "half window must be positive");
    let mut buckets: [Vec<EventIndex>; 5] = core::array::from_fn(|_| Vec::new());
    let mut membership = Vec::with_capacity(bars.len());

    for (i, &bar) in (0_u32..).zip(bars.iter()) {
        let segment = Segment::CLASSIFY_ORDER
            .into_iter()
            .find(|s| s.admits(bar, focus, half_window))
            .unwrap_or(Segment::Outside);
        if let Some(b) = segment.bucket_index() {
            buckets[b].push(EventIndex::new(i));
        }
        membership.push(segment);
    }

    Buckets {
        buckets,
        membership,
    }
}
