// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::event::EventIndex;
use crate::scale::Bar;

/// Picks the events that carry an axis tick.
///
/// Walking in dataset order, an event gets a tick when its base start is at
/// least `min_gap` past the previous tick, or when the event itself is wider
/// than `min_gap`. The first gap is measured from `0`. Ticks are selected on
/// the base axis once per dataset and may end up closer together once the lens
/// squeezes the remainder. [`FocusLens`](crate::FocusLens) passes
/// [`LensConfig::tick_spacing`](crate::LensConfig::tick_spacing) half-windows.
#[must_use]
pub fn tick_events(bars: &[Bar], min_gap: f64) -> Vec<EventIndex> {
    let mut ticks = Vec::new();
    let mut last_x = 0.0;
    for (i, bar) in (0_u32..).zip(bars.iter()) {
        if bar.x >= last_x + min_gap || bar.width > min_gap {
            ticks.push(EventIndex::new(i));
            last_x = bar.x;
        }
    }
    ticks
}
