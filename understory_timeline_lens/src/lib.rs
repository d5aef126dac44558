// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timeline_lens --heading-base-level=0

//! Understory Timeline Lens: a focus + context lens for event timelines.
//!
//! This crate lays out a time-indexed sequence of events (for example, speaker
//! turns in a conversation) under a sliding magnifier. Events near the focus
//! are stretched, events farther away are progressively less so, and the rest
//! of the axis is squeezed just enough that the diagram keeps its total width.
//!
//! The pieces, leaves first:
//!
//! - [`BaseScale`]: the affine time → x projection over the whole dataset,
//!   built once per [`Timeline`].
//! - [`classify`]: partitions events into the five [`Segment`] buckets around
//!   a focus coordinate.
//! - [`FocusTransform`]: the piecewise-linear remap derived from those
//!   buckets, with per-bucket [`ScaleFactors`] and an anti-scale factor for
//!   the remainder.
//! - [`should_recompute`]: the continuity check that skips recomputation
//!   while the window keeps its first and last event.
//! - [`FocusLens`]: a session tying these together for interactive use.
//!
//! It does **not** render anything. Callers are expected to:
//! - Parse their data into [`Event`]s and [`Link`]s and build a [`Timeline`].
//! - Feed focus coordinates from drags, clicks or playback ticks into
//!   [`FocusLens::update`].
//! - Paint the returned [`Layout`]: bars, emphasis opacities, and link paths
//!   as [`kurbo::BezPath`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timeline_lens::{
//!     Event, FocusLens, Lanes, LensConfig, Link, RelationKind, Segment, Timeline,
//! };
//!
//! // Sixty ten-second turns with two-second pauses, alternating speakers.
//! let events = (0..60_u32)
//!     .map(|i| {
//!         let t = f64::from(i) * 12.0;
//!         Event::new(i, t, t + 10.0, (i % 2) as usize)
//!     })
//!     .collect();
//! let links = vec![Link::new(31, 30, RelationKind::Conflict)];
//! let timeline = Timeline::new(events, links).unwrap();
//!
//! let config = LensConfig::default()
//!     .with_diagram_width(1_200.0)
//!     .with_half_window(15.0);
//! let lanes = Lanes::new(2, 0.0..100.0).with_padding(0.1).bottom_up();
//! let mut lens = FocusLens::new(timeline, config, lanes).unwrap();
//!
//! let update = lens.update(600.0);
//! let layout = update.layout.expect("first update always lays out");
//!
//! // The axis keeps its extent.
//! let t = layout.transform();
//! assert!((t.remap_x(0.0) - 0.0).abs() < 1e-9);
//! assert!((t.remap_x(1_200.0) - 1_200.0).abs() < 1e-9);
//!
//! // Events in the window are drawn wider than their base width.
//! let center = update.buckets.window()[0];
//! assert_eq!(layout.event(center).segment, Segment::Window);
//! assert!(layout.event(center).bar.width > lens.bars()[center.get()].width);
//! ```
//!
//! ## Focus range
//!
//! The focus is clamped to `[-2 * half_window, diagram_width - half_window]`:
//! the window may hang off the left edge but never walks past the right.
//!
//! ## Preconditions
//!
//! The arithmetic assumes a non-empty dataset with `end >= start` for every
//! event (enforced by [`Timeline::new`]) and a positive half window (enforced
//! by [`LensConfig::validate`]). The magnified buckets also have to fit in
//! the diagram; otherwise the anti-scale factor becomes non-positive and a
//! warning is logged through the `log` facade.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod classify;
mod config;
mod continuity;
mod event;
mod layout;
mod lens;
mod link;
mod scale;
mod segment;
mod ticks;
mod timeline;
mod transform;

pub use classify::{Buckets, classify};
pub use config::{ConfigError, LensConfig};
pub use continuity::should_recompute;
pub use event::{Event, EventIndex, Link, RelationKind};
pub use layout::{EventLayout, Layout, LinkLayout};
pub use lens::{FocusLens, FocusUpdate};
pub use link::{Lanes, LinkStyle, basis_path, link_points};
pub use scale::{Bar, BaseScale};
pub use segment::{Emphasis, EmphasisLevels, Segment};
pub use ticks::tick_events;
pub use timeline::{DatasetError, LinkRef, Timeline};
pub use transform::{FocusTransform, ScaleFactors};
