// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated, read-only event/link dataset.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use core::ops::Range;

use hashbrown::HashMap;

use crate::event::{Event, EventIndex, Link, RelationKind};

/// Error returned when a dataset cannot be turned into a [`Timeline`].
#[derive(Clone, Debug, PartialEq)]
pub enum DatasetError<K> {
    /// The dataset has no events.
    Empty,
    /// More events than an [`EventIndex`] can address.
    TooManyEvents {
        /// Number of events supplied.
        len: usize,
    },
    /// An event has a non-finite start or end.
    NonFiniteTime {
        /// Offending event.
        id: K,
    },
    /// An event ends before it starts.
    InvertedSpan {
        /// Offending event.
        id: K,
    },
    /// Two events share a key.
    DuplicateId {
        /// Repeated key.
        id: K,
    },
    /// A link references a key that is not in the event list.
    DanglingLink {
        /// Position of the link in the input.
        link: usize,
        /// Unresolved key.
        id: K,
    },
}

impl<K: fmt::Debug> fmt::Display for DatasetError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "timeline has no events"),
            Self::TooManyEvents { len } => write!(f, "timeline has too many events ({len})"),
            Self::NonFiniteTime { id } => write!(f, "event {id:?} has a non-finite time"),
            Self::InvertedSpan { id } => write!(f, "event {id:?} ends before it starts"),
            Self::DuplicateId { id } => write!(f, "event key {id:?} is used more than once"),
            Self::DanglingLink { link, id } => {
                write!(f, "link {link} references unknown event {id:?}")
            }
        }
    }
}

impl<K: fmt::Debug> core::error::Error for DatasetError<K> {}

/// A link with both endpoints resolved to event positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinkRef {
    /// Source event.
    pub source: EventIndex,
    /// Target event.
    pub target: EventIndex,
    /// Relation label.
    pub kind: RelationKind,
}

/// An immutable dataset of events in display order plus their links.
///
/// The timeline owns the key → index map, so links are stored as pairs of
/// [`EventIndex`] and never hold references back into the event list.
#[derive(Clone, Debug)]
pub struct Timeline<K>
where
    K: Copy + Eq + Hash,
{
    events: Vec<Event<K>>,
    links: Vec<LinkRef>,
    index: HashMap<K, EventIndex>,
    time_range: Range<f64>,
}

impl<K> Timeline<K>
where
    K: Copy + Eq + Hash,
{
    /// Validates and indexes a dataset.
    ///
    /// Events keep the order they are given in; that order is the display order
    /// used for "first" and "last" in every bucket.
    pub fn new(events: Vec<Event<K>>, links: Vec<Link<K>>) -> Result<Self, DatasetError<K>> {
        if events.is_empty() {
            return Err(DatasetError::Empty);
        }
        if u32::try_from(events.len()).is_err() {
            return Err(DatasetError::TooManyEvents { len: events.len() });
        }

        let mut index = HashMap::with_capacity(events.len());
        let mut min_start = f64::INFINITY;
        let mut max_end = f64::NEG_INFINITY;
        for (position, event) in (0_u32..).zip(events.iter()) {
            if !event.start.is_finite() || !event.end.is_finite() {
                return Err(DatasetError::NonFiniteTime { id: event.id });
            }
            if event.end < event.start {
                return Err(DatasetError::InvertedSpan { id: event.id });
            }
            if index.insert(event.id, EventIndex::new(position)).is_some() {
                return Err(DatasetError::DuplicateId { id: event.id });
            }
            min_start = min_start.min(event.start);
            max_end = max_end.max(event.end);
        }

        let mut resolved = Vec::with_capacity(links.len());
        for (position, link) in links.iter().enumerate() {
            let lookup = |id: K| {
                index
                    .get(&id)
                    .copied()
                    .ok_or(DatasetError::DanglingLink { link: position, id })
            };
            resolved.push(LinkRef {
                source: lookup(link.source)?,
                target: lookup(link.target)?,
                kind: link.kind,
            });
        }

        Ok(Self {
            events,
            links: resolved,
            index,
            time_range: min_start..max_end,
        })
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always `false`; an empty dataset is rejected by [`Timeline::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in dataset order.
    #[must_use]
    pub fn events(&self) -> &[Event<K>] {
        &self.events
    }

    /// Returns the event at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not belong to this timeline.
    #[must_use]
    pub fn event(&self, index: EventIndex) -> &Event<K> {
        &self.events[index.get()]
    }

    /// Resolved links in input order.
    #[must_use]
    pub fn links(&self) -> &[LinkRef] {
        &self.links
    }

    /// Looks up an event position by key.
    #[must_use]
    pub fn index_of(&self, id: K) -> Option<EventIndex> {
        self.index.get(&id).copied()
    }

    /// `min(start)..max(end)` over all events.
    #[must_use]
    pub fn time_range(&self) -> Range<f64> {
        self.time_range.clone()
    }

    /// Iterates `(index, event)` pairs in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (EventIndex, &Event<K>)> + '_ {
        (0_u32..)
            .zip(self.events.iter())
            .map(|(i, e)| (EventIndex::new(i), e))
    }
}
