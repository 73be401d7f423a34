// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry cache: measured link regions and the text region.
//!
//! ## Overview
//!
//! The cache maps every link that lies inside the text to the visual [`Region`] the
//! measurer reports for its byte range, plus one region for the whole text run. Regions
//! are computed lazily by [`LinkLabel::ensure_layout`](crate::LinkLabel::ensure_layout)
//! and dropped by [`GeometryCache::invalidate`]. Callers only ever borrow regions, so a
//! region can not be used across an invalidation.
//!
//! ## Layout paths
//!
//! - Per-range: one [`TextMeasurer::measure_ranges`] call with the byte range of every
//!   link inside the text. The measurer returns one region per range plus a trailing
//!   region for the whole text.
//! - Single rectangle: when no segmentation is needed (no links, or one link filling the
//!   text) the measurer is only asked for the text size, which is placed inside the layout
//!   area according to the [`TextAlign`]. Both paths hit-test identically for a label
//!   filled by one link.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Insets, Point, Rect, Size};

use crate::registry::LinkRegistry;
use crate::text::TextRun;
use crate::types::LinkId;

/// Platform-measured geometry for a character range, possibly several rectangles
/// (for example when the range wraps across lines).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Region {
    rects: Vec<Rect>,
}

impl Region {
    /// Create a region from its rectangles.
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    /// A region made of one rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self { rects: vec![rect] }
    }

    /// The rectangles making up the region.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// True if the region has no rectangle with positive area.
    pub fn is_empty(&self) -> bool {
        self.rects.iter().all(|r| r.area() <= 0.0)
    }

    /// Whether `pt` lies inside any rectangle. Rectangles are half-open, as [`Rect::contains`].
    pub fn contains(&self, pt: Point) -> bool {
        self.rects.iter().any(|r| r.contains(pt))
    }

    /// Union of all rectangles. Returns `None` if the region has no rectangles.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut it = self.rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }
}

/// Text measurement collaborator.
///
/// Implemented by the toolkit that owns fonts and shaping. The measurer is expected to lay
/// out `text` in the link font (the one links are drawn with) inside `bounds`.
pub trait TextMeasurer {
    /// Measure each byte range of `text`.
    ///
    /// Must return exactly `ranges.len() + 1` regions: one per range, in order, followed by
    /// one region covering the whole text. Returning any other count is a contract violation
    /// and panics in [`LinkLabel::ensure_layout`](crate::LinkLabel::ensure_layout).
    fn measure_ranges(&mut self, text: &str, bounds: Rect, ranges: &[Range<usize>]) -> Vec<Region>;

    /// Measure the size of the whole laid out text.
    fn measure_text(&mut self, text: &str, bounds: Rect) -> Size;
}

/// Horizontal placement of the text inside the layout area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    /// Flush with the left edge.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush with the right edge.
    Right,
}

/// Vertical placement of the text inside the layout area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    /// Flush with the top edge.
    #[default]
    Top,
    /// Centered.
    Middle,
    /// Flush with the bottom edge.
    Bottom,
}

/// Text alignment inside the layout area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextAlign {
    /// Horizontal placement.
    pub horizontal: HorizontalAlign,
    /// Vertical placement.
    pub vertical: VerticalAlign,
}

impl TextAlign {
    /// Create an alignment.
    pub const fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Place a measured text of `text_size` inside `area`.
///
/// Text larger than the area is clamped to it along the overflowing axis.
pub fn text_render_bounds(text_size: Size, area: Rect, align: TextAlign) -> Rect {
    let (x, width) = if text_size.width > area.width() {
        (area.x0, area.width())
    } else {
        let x = match align.horizontal {
            HorizontalAlign::Left => area.x0,
            HorizontalAlign::Center => area.x0 + (area.width() - text_size.width) / 2.0,
            HorizontalAlign::Right => area.x1 - text_size.width,
        };
        (x, text_size.width)
    };
    let (y, height) = if text_size.height > area.height() {
        (area.y0, area.height())
    } else {
        let y = match align.vertical {
            VerticalAlign::Top => area.y0,
            VerticalAlign::Middle => area.y0 + (area.height() - text_size.height) / 2.0,
            VerticalAlign::Bottom => area.y1 - text_size.height,
        };
        (y, text_size.height)
    };
    Rect::new(x, y, x + width, y + height)
}

/// Deflate `bounds` by `padding`, never producing an inverted rectangle.
pub fn padded_area(bounds: Rect, padding: Insets) -> Rect {
    let x0 = bounds.x0 + padding.x0;
    let y0 = bounds.y0 + padding.y0;
    let x1 = (bounds.x1 - padding.x1).max(x0);
    let y1 = (bounds.y1 - padding.y1).max(y0);
    Rect::new(x0, y0, x1, y1)
}

/// Inputs of a layout pass.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LayoutInput<'a> {
    pub(crate) run: TextRun<'a>,
    pub(crate) area: Rect,
    pub(crate) align: TextAlign,
    pub(crate) single_rect_fast_path: bool,
}

/// Which path produced the current layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutPath {
    /// Nothing to measure: the text is empty.
    Empty,
    /// One measurer call per layout with every link range.
    PerRange,
    /// One rectangle from the measured text size.
    SingleRect,
}

/// Lazily computed link regions, exclusively owned.
#[derive(Debug, Default)]
pub struct GeometryCache {
    valid: bool,
    path: Option<LayoutPath>,
    regions: Vec<(LinkId, Region)>, // in registry order
    text_region: Option<Region>,
}

impl GeometryCache {
    /// Create an invalid, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while cached regions describe the current text, font, area, and links.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The path used by the current layout, if valid.
    pub fn layout_path(&self) -> Option<LayoutPath> {
        self.path.filter(|_| self.valid)
    }

    /// Drop all regions and mark the layout invalid.
    pub fn invalidate(&mut self) {
        if self.valid {
            tracing::trace!("text layout invalidated");
        }
        self.valid = false;
        self.path = None;
        self.regions.clear();
        self.text_region = None;
    }

    /// Region of a link, if it has one in the current layout.
    pub fn region_of(&self, id: LinkId) -> Option<&Region> {
        self.regions
            .iter()
            .find(|(owner, _)| *owner == id)
            .map(|(_, region)| region)
    }

    /// Region of the whole text, if measured.
    pub fn text_region(&self) -> Option<&Region> {
        self.text_region.as_ref()
    }

    /// Bounding box of the measured text.
    pub fn text_bounds(&self) -> Option<Rect> {
        self.text_region.as_ref().and_then(Region::bounding_box)
    }

    /// First link (in registry order) whose region contains `pt`.
    pub fn hit_test(&self, pt: Point) -> Option<LinkId> {
        self.regions
            .iter()
            .find(|(_, region)| region.contains(pt))
            .map(|(id, _)| *id)
    }

    /// Bring the cache up to date. Returns `true` if a layout pass ran.
    ///
    /// With empty text the registry is reset to the magic link and no measurement happens.
    pub(crate) fn ensure_layout<D, M>(
        &mut self,
        input: LayoutInput<'_>,
        links: &mut LinkRegistry<D>,
        measurer: &mut M,
    ) -> bool
    where
        M: TextMeasurer + ?Sized,
    {
        if self.valid {
            return false;
        }
        self.regions.clear();
        self.text_region = None;

        let run = input.run;
        if run.is_empty() {
            if !links.is_magic() {
                links.reset_to_magic();
            }
            self.path = Some(LayoutPath::Empty);
            self.valid = true;
            tracing::debug!("empty text, links reset to the whole-text link");
            return true;
        }

        if links.is_empty() || (input.single_rect_fast_path && filled_by_one_link(links, &run)) {
            let size = measurer.measure_text(run.text(), input.area);
            let rect = text_render_bounds(size, input.area, input.align);
            if let Some(only) = links.first() {
                self.regions.push((only.id(), Region::from_rect(rect)));
            }
            self.text_region = Some(Region::from_rect(rect));
            self.path = Some(LayoutPath::SingleRect);
        } else {
            let (owners, ranges): (Vec<LinkId>, Vec<Range<usize>>) = links
                .iter()
                .filter_map(|l| l.text_range(&run).map(|r| (l.id(), r)))
                .unzip();
            let mut measured = measurer.measure_ranges(run.text(), input.area, &ranges);
            assert_eq!(
                measured.len(),
                ranges.len() + 1,
                "measurer must return one region per range plus one for the whole text"
            );
            self.text_region = measured.pop();
            self.regions = owners.into_iter().zip(measured).collect();
            self.path = Some(LayoutPath::PerRange);
        }

        self.valid = true;
        tracing::debug!(
            path = ?self.path,
            regions = self.regions.len(),
            "measured link regions"
        );
        true
    }
}

/// True when exactly one link spans the whole text.
pub(crate) fn filled_by_one_link<D>(links: &LinkRegistry<D>, run: &TextRun<'_>) -> bool {
    match links.first() {
        Some(only) if links.len() == 1 => {
            only.start() == 0 && only.effective_length(run.elements()) == run.elements()
        }
        _ => false,
    }
}
