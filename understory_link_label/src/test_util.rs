// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic monospace measurer and recording host for unit tests.

use alloc::vec::Vec;
use core::ops::Range;

use cursor_icon::CursorIcon;
use kurbo::{Point, Rect, Size};

use crate::geometry::{Region, TextMeasurer};
use crate::host::LabelHost;
use crate::text::element_count;
use crate::types::{LinkId, PointerButton};

pub(crate) const CELL_W: f64 = 10.0;
pub(crate) const LINE_H: f64 = 20.0;

/// Every text element is `CELL_W` wide; lines wrap after `wrap` elements.
#[derive(Debug, Default)]
pub(crate) struct MonoMeasurer {
    pub(crate) wrap: Option<usize>,
    pub(crate) range_calls: usize,
    pub(crate) text_calls: usize,
}

impl MonoMeasurer {
    fn cell_origin(&self, bounds: Rect, index: usize) -> Point {
        let (line, col) = match self.wrap {
            Some(w) if w > 0 => (index / w, index % w),
            _ => (0, index),
        };
        Point::new(
            bounds.x0 + col as f64 * CELL_W,
            bounds.y0 + line as f64 * LINE_H,
        )
    }

    /// One rectangle per line touched by elements `[start, end)`.
    fn rects(&self, bounds: Rect, start: usize, end: usize) -> Vec<Rect> {
        let mut out: Vec<Rect> = Vec::new();
        for i in start..end {
            let o = self.cell_origin(bounds, i);
            let cell = Rect::new(o.x, o.y, o.x + CELL_W, o.y + LINE_H);
            match out.last_mut() {
                Some(last) if last.y0 == cell.y0 => *last = last.union(cell),
                _ => out.push(cell),
            }
        }
        out
    }
}

impl TextMeasurer for MonoMeasurer {
    fn measure_ranges(&mut self, text: &str, bounds: Rect, ranges: &[Range<usize>]) -> Vec<Region> {
        self.range_calls += 1;
        let mut out: Vec<Region> = ranges
            .iter()
            .map(|r| {
                let start = element_count(&text[..r.start]);
                let end = start + element_count(&text[r.clone()]);
                Region::new(self.rects(bounds, start, end))
            })
            .collect();
        out.push(Region::new(self.rects(bounds, 0, element_count(text))));
        out
    }

    fn measure_text(&mut self, text: &str, _bounds: Rect) -> Size {
        self.text_calls += 1;
        let n = element_count(text);
        let (cols, lines) = match self.wrap {
            Some(w) if w > 0 && n > w => (w, n.div_ceil(w)),
            _ => (n, 1),
        };
        Size::new(cols as f64 * CELL_W, lines as f64 * LINE_H)
    }
}

/// Records every request the label makes.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) measurer: MonoMeasurer,
    /// Bounding boxes of invalidated regions; `None` for whole-control repaints.
    pub(crate) invalidations: Vec<Option<Rect>>,
    pub(crate) focus_requests: usize,
    pub(crate) cursor: Option<CursorIcon>,
    pub(crate) captured: bool,
    pub(crate) relayouts: usize,
    pub(crate) clicks: Vec<(LinkId, PointerButton)>,
}

impl RecordingHost {
    pub(crate) fn wrapping(wrap: usize) -> Self {
        Self {
            measurer: MonoMeasurer {
                wrap: Some(wrap),
                ..MonoMeasurer::default()
            },
            ..Self::default()
        }
    }

    pub(crate) fn whole_repaints(&self) -> usize {
        self.invalidations.iter().filter(|r| r.is_none()).count()
    }

    pub(crate) fn take_invalidations(&mut self) -> Vec<Option<Rect>> {
        core::mem::take(&mut self.invalidations)
    }
}

impl TextMeasurer for RecordingHost {
    fn measure_ranges(&mut self, text: &str, bounds: Rect, ranges: &[Range<usize>]) -> Vec<Region> {
        self.measurer.measure_ranges(text, bounds, ranges)
    }

    fn measure_text(&mut self, text: &str, bounds: Rect) -> Size {
        self.measurer.measure_text(text, bounds)
    }
}

impl LabelHost for RecordingHost {
    fn invalidate(&mut self, region: Option<&Region>) {
        self.invalidations
            .push(region.and_then(Region::bounding_box));
    }

    fn request_focus(&mut self) {
        self.focus_requests += 1;
    }

    fn set_cursor_override(&mut self, cursor: Option<CursorIcon>) {
        self.cursor = cursor;
    }

    fn set_capture(&mut self, captured: bool) {
        self.captured = captured;
    }

    fn request_relayout(&mut self) {
        self.relayouts += 1;
    }

    fn link_clicked(&mut self, link: LinkId, button: PointerButton) {
        self.clicks.push((link, button));
    }
}

/// Center of the cell holding element `index` on the first line.
pub(crate) fn cell_center(index: usize) -> Point {
    Point::new(index as f64 * CELL_W + CELL_W / 2.0, LINE_H / 2.0)
}
