// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text elements and byte offsets.
//!
//! Link spans are counted in *text elements* (extended grapheme clusters), so that a link
//! over an emoji or a base letter with combining marks covers what a reader sees as one
//! character. Measurers work on byte offsets into the `&str`. [`TextRun`] converts between
//! the two.

use core::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use crate::types::LinkLength;

/// A borrowed text together with its element count.
#[derive(Copy, Clone, Debug)]
pub struct TextRun<'a> {
    text: &'a str,
    elements: usize,
}

impl<'a> TextRun<'a> {
    /// Segment `text` and count its elements.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            elements: element_count(text),
        }
    }

    /// Build a run when the element count is already known.
    pub(crate) const fn with_elements(text: &'a str, elements: usize) -> Self {
        Self { text, elements }
    }

    /// The underlying text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of text elements.
    pub fn elements(&self) -> usize {
        self.elements
    }

    /// True if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Convert an element index to a byte offset.
    ///
    /// Indices past the last element extrapolate as if every extra element were a single
    /// byte, so the result may exceed `text.len()`. The result saturates at `usize::MAX`.
    pub fn element_to_offset(&self, index: usize) -> usize {
        if index == 0 {
            return 0;
        }
        if self.text.is_empty() {
            return index;
        }
        if index >= self.elements {
            return index
                .saturating_sub(self.elements)
                .saturating_add(self.text.len());
        }
        self.text
            .grapheme_indices(true)
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }

    /// Byte range covered by a link span, clamped to the text.
    ///
    /// Returns `None` when the span is empty or starts at or past the end of the text;
    /// such links are never measured, hit-tested, or focused.
    pub fn link_range(&self, start: usize, length: LinkLength) -> Option<Range<usize>> {
        let length = length.resolve(start, self.elements);
        let char_start = self.element_to_offset(start);
        let char_end = self.element_to_offset(start.saturating_add(length));
        if char_start >= self.text.len() || char_end <= char_start {
            return None;
        }
        let clamped = length.min(self.elements.saturating_sub(start));
        let end = self.element_to_offset(start.saturating_add(clamped));
        Some(char_start..end)
    }
}

/// Count the text elements of `text`.
pub fn element_count(text: &str) -> usize {
    text.graphemes(true).count()
}
