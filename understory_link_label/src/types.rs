// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: link handles, state flags, link areas, and input descriptions.

use bitflags::bitflags;

/// Identifier for a link in a [`LinkRegistry`](crate::LinkRegistry).
///
/// This is a small, copyable handle consisting of a slot index and a generation counter.
/// Two links covering the same span are still distinct links with distinct ids.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `LinkId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `LinkId`.
///
/// - Every id also carries a tag of the registry that issued it, so an id from one label
///   never matches a link of another label.
///
/// Every operation taking a stale or foreign `LinkId` is a no-op: lookups return `None` and
/// setters return `false`. A detached link can never alias a different live link.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LinkId(pub(crate) u32, pub(crate) u32, pub(crate) u32);

impl LinkId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Link slots are intentionally 32-bit; a label never holds 2^32 links."
    )]
    pub(crate) const fn new(registry: u32, idx: usize, generation: u32) -> Self {
        Self(registry, idx as u32, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.1 as usize
    }
}

bitflags! {
    /// Per-link runtime state.
    ///
    /// `HOVER` and `ACTIVE` are driven by the pointer; `VISITED` is owned by the application.
    /// The flags are independent. Keyboard focus is not a flag: it is a single
    /// control-wide pointer, see [`LinkLabel::focus_link`](crate::LinkLabel::focus_link).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LinkState: u8 {
        /// The pointer is over the link.
        const HOVER   = 0b0000_0001;
        /// The primary button went down over the link and has not been released.
        const ACTIVE  = 0b0000_0010;
        /// The link is displayed as visited.
        const VISITED = 0b0000_0100;
    }
}

impl LinkState {
    /// No flags set.
    pub const NORMAL: Self = Self::empty();

    /// Pointer-driven flags, cleared on leave and when the control is disabled.
    pub const TRANSIENT: Self = Self::HOVER.union(Self::ACTIVE);
}

impl Default for LinkState {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Length of a link span, in text elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LinkLength {
    /// The link runs to the end of the text, whatever the text currently is.
    ToEnd,
    /// A fixed number of text elements.
    Count(usize),
}

impl LinkLength {
    /// Resolve to a concrete element count for a link starting at `start` in a text of
    /// `text_elements` elements.
    pub fn resolve(self, start: usize, text_elements: usize) -> usize {
        match self {
            Self::ToEnd => text_elements.saturating_sub(start),
            Self::Count(n) => n,
        }
    }

    /// The raw value: `-1` for [`LinkLength::ToEnd`].
    pub fn to_raw(self) -> i64 {
        match self {
            Self::ToEnd => -1,
            Self::Count(n) => i64::try_from(n).unwrap_or(i64::MAX),
        }
    }
}

/// A raw `(start, length)` link area as supplied by callers.
///
/// `length == -1` means "to the end of the text". The empty area `(0, 0)` means "no link".
/// Values are validated when applied; see [`LinkError::Range`](crate::LinkError::Range).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LinkArea {
    /// Start, in text elements.
    pub start: i64,
    /// Length, in text elements, or `-1` for the rest of the text.
    pub length: i64,
}

impl LinkArea {
    /// The area covering the whole text, whatever it is.
    pub const WHOLE_TEXT: Self = Self::new(0, -1);

    /// Create a new area.
    pub const fn new(start: i64, length: i64) -> Self {
        Self { start, length }
    }

    /// True for the `(0, 0)` area, which declares no link at all.
    pub const fn is_empty(&self) -> bool {
        self.start == 0 && self.length == 0
    }
}

/// Pointer buttons as reported by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (usually left) button.
    Primary,
    /// Secondary (usually right) button.
    Secondary,
    /// Middle button or wheel press.
    Middle,
    /// Any other button, by host-specific number.
    Other(u16),
}

/// Keys the link label reacts to. Everything else is [`Key::Other`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Activates the focus link.
    Enter,
    /// Moves focus to the next (or, with shift, previous) link.
    Tab,
    /// Moves focus to the previous link.
    Up,
    /// Moves focus to the next link.
    Down,
    /// Moves focus to the previous link.
    Left,
    /// Moves focus to the next link.
    Right,
    /// Ignored.
    Other,
}

bitflags! {
    /// Keyboard modifiers held while a key is pressed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0000_0001;
        /// Control.
        const CONTROL = 0b0000_0010;
        /// Alt / Option.
        const ALT     = 0b0000_0100;
    }
}
