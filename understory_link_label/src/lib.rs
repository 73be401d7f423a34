// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_link_label --heading-base-level=0

//! Understory Link Label: a headless core for text labels with clickable links.
//!
//! ## Overview
//!
//! A [`LinkLabel`] holds a text and an ordered set of non-overlapping link spans over it.
//! It tracks per-link hover, press, and visited state, a single keyboard focus link, and
//! tells the surrounding toolkit exactly which part of the control to repaint after each
//! change. It does not draw, shape text, or own a window.
//!
//! Everything the label needs from the toolkit goes through one trait, [`LabelHost`]:
//! text measurement (via its [`TextMeasurer`] supertrait), repaint requests, focus and
//! cursor requests, and the "link clicked" notification. The host is passed into every
//! entry point that may call back into it; the label never stores it.
//!
//! ## Parts
//!
//! - [`registry`]: the links, kept sorted by start, with overlap validation and the implicit
//!   whole-text link used until the first real link is added.
//! - [`geometry`]: measured link regions, computed lazily and dropped on any text, font,
//!   bounds, or link change. Hit testing reads from here.
//! - [`interaction`]: pointer, keyboard, and focus transitions on [`LinkLabel`].
//! - [`traversal`]: keyboard order among enabled links inside the text.
//! - [`render`]: per-link font, color, underline, and focus rectangles for the host to draw.
//!
//! ## Repaint granularity
//!
//! A state change invalidates only the region of the affected link. The whole control is
//! repainted only when one link spans the whole text, or when the link has no measured
//! region yet.
//!
//! ## Text elements
//!
//! Link starts and lengths count extended grapheme clusters, so a link over an emoji or a
//! combining sequence covers the whole visible character.
//!
//! ## Example
//!
//! ```
//! use core::ops::Range;
//! use kurbo::{Point, Rect, Size};
//! use understory_link_label::{
//!     CursorIcon, LabelHost, LinkId, LinkLabel, PointerButton, Region, TextMeasurer,
//! };
//!
//! /// Every byte is 8 units wide, one line.
//! #[derive(Default)]
//! struct Host {
//!     clicked: Vec<LinkId>,
//! }
//!
//! impl TextMeasurer for Host {
//!     fn measure_ranges(&mut self, text: &str, b: Rect, ranges: &[Range<usize>]) -> Vec<Region> {
//!         let span = |r: Range<usize>| {
//!             Region::from_rect(Rect::new(
//!                 b.x0 + 8.0 * r.start as f64,
//!                 b.y0,
//!                 b.x0 + 8.0 * r.end as f64,
//!                 b.y0 + 16.0,
//!             ))
//!         };
//!         let mut out: Vec<Region> = ranges.iter().cloned().map(span).collect();
//!         out.push(span(0..text.len()));
//!         out
//!     }
//!
//!     fn measure_text(&mut self, text: &str, _: Rect) -> Size {
//!         Size::new(8.0 * text.len() as f64, 16.0)
//!     }
//! }
//!
//! impl LabelHost for Host {
//!     fn invalidate(&mut self, _: Option<&Region>) {}
//!     fn request_focus(&mut self) {}
//!     fn set_cursor_override(&mut self, _: Option<CursorIcon>) {}
//!     fn link_clicked(&mut self, link: LinkId, _: PointerButton) {
//!         self.clicked.push(link);
//!     }
//! }
//!
//! let mut host = Host::default();
//! let mut label: LinkLabel = LinkLabel::new("Read the docs", Rect::new(0.0, 0.0, 200.0, 20.0));
//! let docs = label.add_link(9, 4, &mut host).unwrap();
//!
//! let over_docs = Point::new(8.0 * 10.5, 8.0);
//! label.on_pointer_move(over_docs, &mut host);
//! label.on_pointer_down(over_docs, PointerButton::Primary, 1, &mut host);
//! label.on_pointer_up(over_docs, PointerButton::Primary, 1, &mut host);
//! assert_eq!(host.clicked, [docs]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
pub mod geometry;
pub mod host;
pub mod interaction;
pub mod label;
pub mod registry;
pub mod render;
pub mod text;
pub mod traversal;
pub mod types;

#[cfg(test)]
mod test_util;

pub use cursor_icon::CursorIcon;

pub use error::LinkError;
pub use geometry::{
    GeometryCache, HorizontalAlign, LayoutPath, Region, TextAlign, TextMeasurer, VerticalAlign,
};
pub use host::LabelHost;
pub use label::{LabelConfig, LinkLabel};
pub use registry::{Link, LinkRegistry};
pub use render::{ColorRole, FontVariant, LinkBehavior, LinkPaint, PaintPlan, RenderContext};
pub use text::TextRun;
pub use types::{Key, LinkArea, LinkId, LinkLength, LinkState, Modifiers, PointerButton};
