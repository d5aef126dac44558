// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input records: speaker turns and the relations between them.

/// A single turn on the timeline.
///
/// Times are expressed in a caller-chosen unit (typically seconds) and must be
/// finite with `end >= start`. `track` is the lane the turn is drawn in, for
/// example the index of its speaker.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event<K> {
    /// Caller key, unique within a [`Timeline`](crate::Timeline).
    pub id: K,
    /// Start time.
    pub start: f64,
    /// End time.
    pub end: f64,
    /// Lane index.
    pub track: usize,
}

impl<K> Event<K> {
    /// Creates a new event.
    #[must_use]
    pub fn new(id: K, start: f64, end: f64, track: usize) -> Self {
        Self {
            id,
            start,
            end,
            track,
        }
    }

    /// Returns `end - start`.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// The inferred relation a [`Link`] represents.
///
/// Only [`RelationKind::Conflict`] changes geometry: conflict links are drawn
/// below their nodes rather than above.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationKind {
    /// One turn draws a conclusion from another.
    #[default]
    Inference,
    /// One turn restates another.
    Rephrase,
    /// One turn contradicts another.
    Conflict,
    /// Any other relation label.
    Other,
}

impl RelationKind {
    /// Returns `true` for [`RelationKind::Conflict`].
    #[must_use]
    pub fn is_conflict(self) -> bool {
        matches!(self, Self::Conflict)
    }
}

/// A directed relation between two events, referenced by key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link<K> {
    /// Key of the source event.
    pub source: K,
    /// Key of the target event.
    pub target: K,
    /// Relation label.
    pub kind: RelationKind,
}

impl<K> Link<K> {
    /// Creates a new link.
    #[must_use]
    pub fn new(source: K, target: K, kind: RelationKind) -> Self {
        Self {
            source,
            target,
            kind,
        }
    }
}

/// Position of an event in its [`Timeline`](crate::Timeline), in dataset order.
///
/// Bucket membership and continuity checks compare events by index, never by
/// value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventIndex(u32);

impl EventIndex {
    /// Creates an index from a raw position.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw position as `usize`.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, EventIndex, RelationKind};

    #[test]
    fn duration_is_end_minus_start() {
        let e = Event::new("a", 2.5, 7.0, 0);
        assert!((e.duration() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn only_conflict_is_conflict() {
        assert!(RelationKind::Conflict.is_conflict());
        assert!(!RelationKind::Inference.is_conflict());
        assert!(!RelationKind::Rephrase.is_conflict());
        assert!(!RelationKind::Other.is_conflict());
    }

    #[test]
    fn event_index_orders_by_position() {
        assert!(EventIndex::new(1) < EventIndex::new(2));
        assert_eq!(EventIndex::new(7).get(), 7);
    }
}
