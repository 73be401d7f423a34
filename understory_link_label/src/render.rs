// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render selector: paint parameters per link, no drawing.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::geometry::Region;
use crate::registry::Link;
use crate::types::{LinkId, LinkState};

/// How links are underlined.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LinkBehavior {
    /// Platform convention; resolves to [`LinkBehavior::AlwaysUnderline`].
    #[default]
    SystemDefault,
    /// Links are always underlined.
    AlwaysUnderline,
    /// Links are underlined only while hovered.
    HoverUnderline,
    /// Links are never underlined.
    NeverUnderline,
}

impl LinkBehavior {
    /// Replace [`LinkBehavior::SystemDefault`] by the concrete behavior it stands for.
    pub fn resolve(self) -> Self {
        match self {
            Self::SystemDefault => Self::AlwaysUnderline,
            other => other,
        }
    }

    /// Whether the font variant is underlined.
    pub fn underline(self, font: FontVariant) -> bool {
        match self.resolve() {
            Self::AlwaysUnderline => true,
            Self::HoverUnderline => font == FontVariant::HoverLink,
            Self::NeverUnderline | Self::SystemDefault => false,
        }
    }

    /// True when hovering a link changes how it looks.
    pub fn hover_font_differs(self) -> bool {
        self.underline(FontVariant::Link) != self.underline(FontVariant::HoverLink)
    }
}

/// Font a link is drawn with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontVariant {
    /// The regular link font.
    Link,
    /// The font for a hovered link.
    HoverLink,
}

/// Color a link is drawn with; the host maps roles to concrete colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorRole {
    /// Enabled, not active, not visited.
    Normal,
    /// Pressed.
    Active,
    /// Visited.
    Visited,
    /// The link itself is disabled.
    Disabled,
}

/// Control-wide inputs of the render selector.
#[derive(Copy, Clone, Debug)]
pub struct RenderContext {
    /// The control has keyboard focus.
    pub control_focused: bool,
    /// Focus rectangles are currently shown (platform convention, e.g. after keyboard use).
    pub show_focus_cues: bool,
    /// The focus link, if any.
    pub focus_link: Option<LinkId>,
    /// Underline behavior.
    pub behavior: LinkBehavior,
    /// When one link fills the text: the measured text bounds, used as the single merged
    /// focus rectangle.
    pub merged_focus_rect: Option<Rect>,
}

/// Paint parameters of one link.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkPaint<'a> {
    /// The link.
    pub link: LinkId,
    /// Where to draw it; clip the text run to this region.
    pub region: &'a Region,
    /// Font variant.
    pub font: FontVariant,
    /// Whether the font is underlined.
    pub underline: bool,
    /// Color role.
    pub color: ColorRole,
    /// Focus rectangles to draw, empty when no focus cue is shown.
    pub focus_rects: Vec<Rect>,
}

/// Select paint parameters for `link` drawn in `region`.
pub fn select_paint<'a, D>(
    link: &Link<D>,
    region: &'a Region,
    cx: &RenderContext,
) -> LinkPaint<'a> {
    let state = link.state();
    let font = if state.contains(LinkState::HOVER) {
        FontVariant::HoverLink
    } else {
        FontVariant::Link
    };
    let color = if !link.is_enabled() {
        ColorRole::Disabled
    } else if state.contains(LinkState::ACTIVE) {
        ColorRole::Active
    } else if state.contains(LinkState::VISITED) {
        ColorRole::Visited
    } else {
        ColorRole::Normal
    };
    let focus_rects = if cx.control_focused
        && cx.show_focus_cues
        && cx.focus_link == Some(link.id())
    {
        match cx.merged_focus_rect {
            Some(merged) => alloc::vec![merged],
            None => region.rects().to_vec(),
        }
    } else {
        Vec::new()
    };
    LinkPaint {
        link: link.id(),
        region,
        font,
        underline: cx.behavior.underline(font),
        color,
        focus_rects,
    }
}

/// Everything the host needs to paint the label.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintPlan<'a> {
    /// Empty text: paint the background only.
    Empty,
    /// The control is disabled: draw the whole text in the disabled style.
    Disabled {
        /// Region of the whole text.
        text_region: &'a Region,
    },
    /// Regular painting.
    Enabled {
        /// Region of the whole text, drawn in the normal text style outside the link regions.
        text_region: &'a Region,
        /// One entry per link that has a region, in registry order.
        links: Vec<LinkPaint<'a>>,
    },
}
