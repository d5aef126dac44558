// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::event::EventIndex;

/// Decides whether a new window bucket needs a fresh transform.
///
/// Returns `false` only when there is a previous bucket and both its first
/// and last event are the same as those of `current`. Two empty buckets count
/// as unchanged.
///
/// This compares endpoints only. An interior event entering or leaving while
/// both ends stay put is not detected, and the previous transform is kept.
/// With contiguous, non-overlapping turns this cannot happen; overlapping
/// turns can trigger it.
#[must_use]
pub fn should_recompute(previous: Option<&[EventIndex]>, current: &[EventIndex]) -> bool {
    match previous {
        None => true,
        Some(prev) => prev.first() != current.first() || prev.last() != current.last(),
    }
}
