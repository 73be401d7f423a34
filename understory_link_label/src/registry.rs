// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Link registry: the ordered, non-overlapping set of links of one label.
//!
//! ## Ordering
//!
//! Links are kept sorted ascending by start. The sort is stable: links with equal starts
//! (possible only for zero-length links) keep their insertion order.
//!
//! ## Magic link
//!
//! A label without explicitly declared links treats its whole text as one implicit link,
//! `(0, -1)`. That link is replaced, not appended to, by the first real
//! [`add`](crate::LinkLabel::add_link).
//!
//! ## Overlap
//!
//! Overlap is validated lazily, after a structural mutation has been applied, by
//! [`LinkRegistry::validate`]. Zero-length links are valid but never overlap anything.

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::ops::Range;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::LinkError;
use crate::text::TextRun;
use crate::types::{LinkArea, LinkId, LinkLength, LinkState};

/// A single clickable span of the label text.
#[derive(Clone, Debug)]
pub struct Link<D = ()> {
    id: LinkId,
    pub(crate) start: usize,
    pub(crate) length: LinkLength,
    pub(crate) enabled: bool,
    pub(crate) state: LinkState,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) data: Option<D>,
}

impl<D> Link<D> {
    fn new(id: LinkId, start: usize, length: LinkLength, data: Option<D>) -> Self {
        Self {
            id,
            start,
            length,
            enabled: true,
            state: LinkState::NORMAL,
            name: None,
            description: None,
            data,
        }
    }

    /// This link's handle.
    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Start, in text elements.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Declared length.
    pub fn length(&self) -> LinkLength {
        self.length
    }

    /// Length resolved against a text of `text_elements` elements.
    pub fn effective_length(&self, text_elements: usize) -> usize {
        self.length.resolve(self.start, text_elements)
    }

    /// Whether the link can be clicked and focused.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the link is displayed as visited.
    pub fn is_visited(&self) -> bool {
        self.state.contains(LinkState::VISITED)
    }

    /// Current state flags.
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Optional name, used by [`LinkRegistry::index_of_key`].
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Optional free-form description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Application data attached to the link.
    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    /// The raw area of this link.
    pub fn area(&self) -> LinkArea {
        LinkArea::new(
            i64::try_from(self.start).unwrap_or(i64::MAX),
            self.length.to_raw(),
        )
    }

    /// Byte range of this link in `run`, or `None` if it lies outside the text.
    pub fn text_range(&self, run: &TextRun<'_>) -> Option<Range<usize>> {
        run.link_range(self.start, self.length)
    }

    pub(crate) fn is_magic(&self) -> bool {
        self.start == 0 && self.length == LinkLength::ToEnd
    }
}

/// Validate a raw `(start, length)` pair.
pub(crate) fn validate_span(start: i64, length: i64) -> Result<(usize, LinkLength), LinkError> {
    let (Ok(start_elems), true) = (usize::try_from(start), length >= -1) else {
        return Err(LinkError::Range { start, length });
    };
    let length = match usize::try_from(length) {
        Ok(n) => LinkLength::Count(n),
        Err(_) => LinkLength::ToEnd,
    };
    Ok((start_elems, length))
}

/// Ordered collection of the links of one label.
///
/// Read access is public; mutations go through [`LinkLabel`](crate::LinkLabel) so that focus,
/// geometry, and selectability stay consistent with the set of links.
#[derive(Debug)]
pub struct LinkRegistry<D = ()> {
    tag: u32, // distinguishes ids issued by different registries
    links: Vec<Link<D>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    last_accessed: Cell<Option<usize>>,
}

static NEXT_TAG: AtomicU32 = AtomicU32::new(0);

impl<D> Default for LinkRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> LinkRegistry<D> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tag: NEXT_TAG.fetch_add(1, Ordering::Relaxed),
            links: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            last_accessed: Cell::new(None),
        }
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True if there are no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links in storage (ascending start) order.
    pub fn iter(&self) -> impl Iterator<Item = &Link<D>> + '_ {
        self.links.iter()
    }

    /// Link at a storage index.
    pub fn by_index(&self, index: usize) -> Option<&Link<D>> {
        self.links.get(index)
    }

    /// First link in storage order.
    pub fn first(&self) -> Option<&Link<D>> {
        self.links.first()
    }

    /// Whether `id` refers to a live link of this registry.
    pub fn contains(&self, id: LinkId) -> bool {
        self.index_of(id).is_some()
    }

    /// Storage index of a live link. `None` for stale ids and ids of other registries.
    pub fn index_of(&self, id: LinkId) -> Option<usize> {
        if id.0 != self.tag {
            return None;
        }
        self.links.iter().position(|l| l.id == id)
    }

    /// Look up a live link.
    pub fn get(&self, id: LinkId) -> Option<&Link<D>> {
        self.index_of(id).map(|i| &self.links[i])
    }

    pub(crate) fn get_mut(&mut self, id: LinkId) -> Option<&mut Link<D>> {
        let index = self.index_of(id)?;
        self.links.get_mut(index)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Link<D>> + '_ {
        self.links.iter_mut()
    }

    /// True when the registry is in its default state: exactly one `(0, -1)` link.
    pub fn is_magic(&self) -> bool {
        matches!(self.links.as_slice(), [only] if only.is_magic())
    }

    /// Index of the first link whose name matches `key`, ignoring case.
    ///
    /// An empty key never matches. The index of the last successful lookup is cached so that
    /// repeated lookups of the same key do not rescan.
    pub fn index_of_key(&self, key: &str) -> Option<usize> {
        if key.is_empty() {
            return None;
        }
        if let Some(last) = self.last_accessed.get()
            && self.links.get(last).is_some_and(|l| name_matches(l, key))
        {
            return Some(last);
        }
        let found = self.links.iter().position(|l| name_matches(l, key));
        if found.is_some() {
            self.last_accessed.set(found);
        }
        found
    }

    /// The first link whose name matches `key`, ignoring case.
    pub fn by_key(&self, key: &str) -> Option<&Link<D>> {
        self.index_of_key(key).and_then(|i| self.links.get(i))
    }

    /// Whether any link is named `key`, ignoring case.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index_of_key(key).is_some()
    }

    /// Check that no two links overlap in a text of `text_elements` elements.
    pub fn validate(&self, text_elements: usize) -> Result<(), LinkError> {
        for (x, left) in self.links.iter().enumerate() {
            let left_end = left
                .start
                .saturating_add(left.effective_length(text_elements));
            for right in &self.links[x + 1..] {
                let right_end = right
                    .start
                    .saturating_add(right.effective_length(text_elements));
                let max_start = left.start.max(right.start);
                let min_end = left_end.min(right_end);
                if max_start < min_end {
                    return Err(LinkError::Overlap {
                        first: left.id,
                        second: right.id,
                    });
                }
            }
        }
        Ok(())
    }

    /// Insert a link and restore start order. Returns the new handle.
    pub(crate) fn insert(&mut self, start: usize, length: LinkLength, data: Option<D>) -> LinkId {
        let id = self.alloc_id();
        self.links.push(Link::new(id, start, length, data));
        self.sort();
        id
    }

    pub(crate) fn remove_index(&mut self, index: usize) -> Link<D> {
        let link = self.links.remove(index);
        self.free_list.push(link.id.idx());
        self.last_accessed.set(None);
        link
    }

    /// Remove every link.
    pub(crate) fn clear(&mut self) {
        for link in self.links.drain(..) {
            self.free_list.push(link.id.idx());
        }
        self.last_accessed.set(None);
    }

    /// Replace the contents with the single `(0, -1)` link.
    pub(crate) fn reset_to_magic(&mut self) -> LinkId {
        self.clear();
        self.insert(0, LinkLength::ToEnd, None)
    }

    /// Stable sort by start.
    pub(crate) fn sort(&mut self) {
        self.links.sort_by_key(|l| l.start);
        self.last_accessed.set(None);
    }

    fn alloc_id(&mut self) -> LinkId {
        if let Some(idx) = self.free_list.pop() {
            self.generations[idx] += 1;
            LinkId::new(self.tag, idx, self.generations[idx])
        } else {
            self.generations.push(1);
            LinkId::new(self.tag, self.generations.len() - 1, 1)
        }
    }
}

fn name_matches<D>(link: &Link<D>, key: &str) -> bool {
    link.name.as_deref().is_some_and(|name| {
        name.chars()
            .flat_map(char::to_lowercase)
            .eq(key.chars().flat_map(char::to_lowercase))
    })
}
