// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The link label control core: text, links, geometry, focus, and properties.
//!
//! Pointer and keyboard handling lives in [`interaction`](crate::interaction).

use alloc::string::String;

use cursor_icon::CursorIcon;
use kurbo::{Insets, Rect};

use crate::error::LinkError;
use crate::geometry::{GeometryCache, LayoutInput, TextAlign, filled_by_one_link, padded_area};
use crate::host::LabelHost;
use crate::registry::{Link, LinkRegistry, validate_span};
use crate::render::{LinkBehavior, PaintPlan, RenderContext, select_paint};
use crate::text::{TextRun, element_count};
use crate::types::{LinkArea, LinkId, LinkLength, LinkState};

/// Construction-time settings of a [`LinkLabel`].
#[derive(Clone, Debug)]
pub struct LabelConfig {
    /// Use a single measured rectangle instead of per-range measurement when one link fills
    /// the text. Defaults to `true`.
    pub single_rect_fast_path: bool,
    /// Whether focus rectangles are drawn. Toolkits that hide focus cues until the keyboard
    /// is used update this through [`LinkLabel::set_show_focus_cues`]. Defaults to `true`.
    pub show_focus_cues: bool,
    /// Underline behavior.
    pub link_behavior: LinkBehavior,
    /// Placement of the text inside the padded bounds.
    pub text_align: TextAlign,
    /// Space between the control bounds and the text.
    pub padding: Insets,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            single_rect_fast_path: true,
            show_focus_cues: true,
            link_behavior: LinkBehavior::default(),
            text_align: TextAlign::default(),
            padding: Insets::ZERO,
        }
    }
}

/// A text label whose text contains clickable, focusable links.
///
/// `D` is application data that can be attached to each link.
#[derive(Debug)]
pub struct LinkLabel<D = ()> {
    pub(crate) text: String,
    pub(crate) elements: usize,
    pub(crate) links: LinkRegistry<D>,
    pub(crate) geometry: GeometryCache,
    pub(crate) focus_link: Option<LinkId>,
    pub(crate) bounds: Rect,
    pub(crate) padding: Insets,
    pub(crate) text_align: TextAlign,
    pub(crate) link_behavior: LinkBehavior,
    pub(crate) single_rect_fast_path: bool,
    pub(crate) show_focus_cues: bool,
    pub(crate) enabled: bool,
    pub(crate) focused: bool,
    pub(crate) selectable: bool,
    pub(crate) tab_stop: bool,
    pub(crate) cursor_override: Option<CursorIcon>,
    pub(crate) captured: bool,
    pub(crate) received_double_click: bool,
    pub(crate) processing_got_focus: bool,
}

impl<D> LinkLabel<D> {
    /// Create a label whose whole text is one link.
    pub fn new(text: impl Into<String>, bounds: Rect) -> Self {
        Self::with_config(text, bounds, LabelConfig::default())
    }

    /// Create a label with explicit settings.
    pub fn with_config(text: impl Into<String>, bounds: Rect, config: LabelConfig) -> Self {
        let text = text.into();
        let elements = element_count(&text);
        let mut links = LinkRegistry::new();
        links.reset_to_magic();
        let mut label = Self {
            text,
            elements,
            links,
            geometry: GeometryCache::new(),
            focus_link: None,
            bounds,
            padding: config.padding,
            text_align: config.text_align,
            link_behavior: config.link_behavior,
            single_rect_fast_path: config.single_rect_fast_path,
            show_focus_cues: config.show_focus_cues,
            enabled: true,
            focused: false,
            selectable: false,
            tab_stop: false,
            cursor_override: None,
            captured: false,
            received_double_click: false,
            processing_got_focus: false,
        };
        label.selectable = label.any_link_in_text();
        label.tab_stop = label.selectable;
        label
    }

    // --- text ---

    /// The label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text with its element count.
    pub fn text_run(&self) -> TextRun<'_> {
        TextRun::with_elements(&self.text, self.elements)
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>, host: &mut (impl LabelHost + ?Sized)) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.text = text;
        self.on_text_changed(host);
    }

    /// The text changed: recount elements, drop the layout, and re-derive selectability.
    pub fn on_text_changed(&mut self, host: &mut (impl LabelHost + ?Sized)) {
        self.elements = element_count(&self.text);
        self.geometry.invalidate();
        self.update_selectability(host);
        host.request_relayout();
        host.invalidate(None);
    }

    /// The font changed. Link regions depend on metrics, so the layout is dropped.
    pub fn on_font_changed(&mut self, host: &mut (impl LabelHost + ?Sized)) {
        self.geometry.invalidate();
        host.request_relayout();
        host.invalidate(None);
    }

    // --- layout properties ---

    /// Control bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Move or resize the control. Any change drops the layout.
    pub fn set_bounds(&mut self, bounds: Rect, host: &mut (impl LabelHost + ?Sized)) {
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        self.geometry.invalidate();
        host.invalidate(None);
    }

    /// Padding between bounds and text.
    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Set the padding.
    pub fn set_padding(&mut self, padding: Insets, host: &mut (impl LabelHost + ?Sized)) {
        if padding == self.padding {
            return;
        }
        self.padding = padding;
        self.geometry.invalidate();
        host.request_relayout();
        host.invalidate(None);
    }

    /// Text alignment.
    pub fn text_align(&self) -> TextAlign {
        self.text_align
    }

    /// Set the text alignment.
    pub fn set_text_align(&mut self, align: TextAlign, host: &mut (impl LabelHost + ?Sized)) {
        if align == self.text_align {
            return;
        }
        self.text_align = align;
        self.geometry.invalidate();
        self.update_selectability(host);
        host.invalidate(None);
    }

    /// Underline behavior.
    pub fn link_behavior(&self) -> LinkBehavior {
        self.link_behavior
    }

    /// Set the underline behavior. Repaints every link.
    pub fn set_link_behavior(
        &mut self,
        behavior: LinkBehavior,
        host: &mut (impl LabelHost + ?Sized),
    ) {
        if behavior == self.link_behavior {
            return;
        }
        self.link_behavior = behavior;
        self.invalidate_link(None, host);
    }

    /// Area the text is laid out in: bounds minus padding.
    pub fn layout_area(&self) -> Rect {
        padded_area(self.bounds, self.padding)
    }

    /// The geometry cache, for inspection. Regions are only present after a layout pass.
    pub fn geometry(&self) -> &GeometryCache {
        &self.geometry
    }

    /// Bring the geometry cache up to date. Returns `true` if a layout pass ran.
    pub fn ensure_layout(&mut self, host: &mut (impl LabelHost + ?Sized)) -> bool {
        let input = LayoutInput {
            run: TextRun::with_elements(&self.text, self.elements),
            area: padded_area(self.bounds, self.padding),
            align: self.text_align,
            single_rect_fast_path: self.single_rect_fast_path,
        };
        let ran = self.geometry.ensure_layout(input, &mut self.links, host);
        if self.focus_link.is_some_and(|id| !self.links.contains(id)) {
            // Empty text replaced the links.
            self.focus_link = None;
        }
        ran
    }

    // --- control state ---

    /// Whether the control is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the control has keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The link holding keyboard focus within the control.
    pub fn focus_link(&self) -> Option<LinkId> {
        self.focus_link
    }

    /// The cursor currently requested from the host.
    pub fn cursor_override(&self) -> Option<CursorIcon> {
        self.cursor_override
    }

    /// Whether pointer events are being captured.
    pub fn is_capturing(&self) -> bool {
        self.captured
    }

    /// Whether the control can take focus: true iff some link lies inside the text.
    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Whether Tab moves between links. Follows selectability unless set explicitly.
    pub fn tab_stop(&self) -> bool {
        self.tab_stop
    }

    /// Set whether Tab moves between links.
    pub fn set_tab_stop(&mut self, tab_stop: bool) {
        self.tab_stop = tab_stop;
    }

    /// Whether focus rectangles are drawn.
    pub fn show_focus_cues(&self) -> bool {
        self.show_focus_cues
    }

    /// Show or hide focus rectangles. Repaints the focus link.
    pub fn set_show_focus_cues(&mut self, show: bool, host: &mut (impl LabelHost + ?Sized)) {
        if show == self.show_focus_cues {
            return;
        }
        self.show_focus_cues = show;
        if let Some(id) = self.focus_link {
            self.invalidate_link(Some(id), host);
        }
    }

    // --- links ---

    /// The links, in ascending start order.
    pub fn links(&self) -> &LinkRegistry<D> {
        &self.links
    }

    /// A live link.
    pub fn link(&self, id: LinkId) -> Option<&Link<D>> {
        self.links.get(id)
    }

    /// The area of the first link, `(0, 0)` when there are no links.
    pub fn link_area(&self) -> LinkArea {
        self.links.first().map_or(LinkArea::default(), Link::area)
    }

    /// Replace all links by zero links (for the empty area `(0, 0)`) or one link.
    ///
    /// Fails without any change when `start < 0` or `length < -1`.
    pub fn set_link_area(
        &mut self,
        area: LinkArea,
        host: &mut (impl LabelHost + ?Sized),
    ) -> Result<(), LinkError> {
        let span = if area.is_empty() {
            None
        } else {
            Some(validate_span(area.start, area.length)?)
        };
        let previous = self.link_area();

        self.set_focus_link(None, host);
        self.links.clear();
        if let Some((start, length)) = span {
            self.links.insert(start, length, None);
        }
        tracing::debug!(?area, "link area replaced");

        // Regions are keyed by link id, and the link was recreated.
        self.geometry.invalidate();
        self.update_selectability(host);
        if previous != self.link_area() {
            host.request_relayout();
            host.invalidate(None);
        }
        Ok(())
    }

    /// Add a link without data. See [`LinkLabel::add_link_with_data`].
    pub fn add_link(
        &mut self,
        start: i64,
        length: i64,
        host: &mut (impl LabelHost + ?Sized),
    ) -> Result<LinkId, LinkError> {
        self.add_span(start, length, None, host)
    }

    /// Add a link covering `length` elements from `start` (`-1` for the rest of the text).
    ///
    /// The implicit whole-text link is replaced by the first added link. Overlap with an
    /// existing link is reported after the link has been added; the caller is expected to
    /// remove or move one of the overlapping links.
    pub fn add_link_with_data(
        &mut self,
        start: i64,
        length: i64,
        data: D,
        host: &mut (impl LabelHost + ?Sized),
    ) -> Result<LinkId, LinkError> {
        self.add_span(start, length, Some(data), host)
    }

    fn add_span(
        &mut self,
        start: i64,
        length: i64,
        data: Option<D>,
        host: &mut (impl LabelHost + ?Sized),
    ) -> Result<LinkId, LinkError> {
        let (start, length) = validate_span(start, length).inspect_err(|e| {
            tracing::warn!(%e, "rejected link");
        })?;
        if self.links.is_magic() {
            self.set_focus_link(None, host);
            self.links.clear();
        }
        let id = self.links.insert(start, length, data);
        tracing::debug!(?id, start, ?length, "link added");
        self.after_structural_change(host)?;
        Ok(id)
    }

    /// Remove a link. Returns `Ok(false)` for stale handles.
    ///
    /// If the removed link had focus, focus moves to the first remaining link.
    pub fn remove_link(
        &mut self,
        id: LinkId,
        host: &mut (impl LabelHost + ?Sized),
    ) -> Result<bool, LinkError> {
        let Some(index) = self.links.index_of(id) else {
            return Ok(false);
        };
        self.remove_index(index, host)
    }

    /// Remove the link at a storage index. Returns `Ok(false)` when out of range.
    pub fn remove_link_at(
        &mut self,
        index: usize,
        host: &mut (impl LabelHost + ?Sized),
    ) -> Result<bool, LinkError> {
        if index >= self.links.len() {
            return Ok(false);
        }
        self.remove_index(index, host)
    }

    fn remove_index(
        &mut self,
        index: usize,
        host: &mut (impl LabelHost + ?Sized),
    ) -> Result<bool, LinkError> {
        // Repaint while the region is still cached.
        let id = self.links.by_index(index).map(Link::id);
        self.invalidate_link(id, host);
        let removed = self.links.remove_index(index);
        tracing::debug!(id = ?removed.id(), "link removed");
        if self.focus_link == Some(removed.id()) {
            self.focus_link = self.links.first().map(Link::id);
            if let Some(first) = self.focus_link {
                self.invalidate_link(Some(first), host);
            }
        }
        if removed.state.contains(LinkState::HOVER) {
            self.set_cursor_override(None, host);
        }
        self.after_structural_change(host)?;
        Ok(true)
    }

    /// Remove every link.
    pub fn clear_links(&mut self, host: &mut (impl LabelHost + ?Sized)) {
        let had_links = !self.links.is_empty();
        self.set_focus_link(None, host);
        self.links.clear();
        self.geometry.invalidate();
        self.update_selectability(host);
        if had_links {
            host.request_relayout();
        }
        host.invalidate(None);
    }

    /// Enable or disable one link. Returns `false` for stale handles.
    ///
    /// Disabling clears the pointer-driven state of the link.
    pub fn set_link_enabled(
        &mut self,
        id: LinkId,
        enabled: bool,
        host: &mut (impl LabelHost + ?Sized),
    ) -> bool {
        let Some(link) = self.links.get_mut(id) else {
            return false;
        };
        if link.enabled == enabled {
            return true;
        }
        link.enabled = enabled;
        let had_transient = link.state.intersects(LinkState::TRANSIENT);
        if had_transient {
            link.state.remove(LinkState::TRANSIENT);
            self.set_cursor_override(None, host);
        }
        self.invalidate_link(Some(id), host);
        true
    }

    /// Mark one link as visited or not. Returns `false` for stale handles.
    pub fn set_link_visited(
        &mut self,
        id: LinkId,
        visited: bool,
        host: &mut (impl LabelHost + ?Sized),
    ) -> bool {
        let Some(link) = self.links.get_mut(id) else {
            return false;
        };
        if link.state.contains(LinkState::VISITED) != visited {
            link.state.set(LinkState::VISITED, visited);
            self.invalidate_link(Some(id), host);
        }
        true
    }

    /// Whether the first link is visited.
    pub fn link_visited(&self) -> bool {
        self.links.first().is_some_and(Link::is_visited)
    }

    /// Mark the first link visited, adding a whole-text link when there are none.
    pub fn set_link_visited_first(&mut self, visited: bool, host: &mut (impl LabelHost + ?Sized)) {
        if visited == self.link_visited() {
            return;
        }
        let id = match self.links.first() {
            Some(first) => first.id(),
            None => {
                let id = self.links.insert(0, LinkLength::ToEnd, None);
                self.geometry.invalidate();
                self.update_selectability(host);
                id
            }
        };
        self.set_link_visited(id, visited, host);
    }

    /// Move or resize one link. Returns `Ok(false)` for stale handles.
    pub fn set_link_span(
        &mut self,
        id: LinkId,
        start: i64,
        length: i64,
        host: &mut (impl LabelHost + ?Sized),
    ) -> Result<bool, LinkError> {
        let (start, length) = validate_span(start, length)?;
        let Some(link) = self.links.get_mut(id) else {
            return Ok(false);
        };
        if link.start == start && link.length == length {
            return Ok(true);
        }
        link.start = start;
        link.length = length;
        self.links.sort();
        self.after_structural_change(host)?;
        Ok(true)
    }

    /// Name a link for [`LinkRegistry::index_of_key`]. Returns `false` for stale handles.
    pub fn set_link_name(&mut self, id: LinkId, name: Option<String>) -> bool {
        self.links.get_mut(id).map(|l| l.name = name).is_some()
    }

    /// Describe a link. Returns `false` for stale handles.
    pub fn set_link_description(&mut self, id: LinkId, description: Option<String>) -> bool {
        self.links
            .get_mut(id)
            .map(|l| l.description = description)
            .is_some()
    }

    /// Application data of a link.
    pub fn link_data(&self, id: LinkId) -> Option<&D> {
        self.links.get(id).and_then(Link::data)
    }

    /// Mutable application data of a link.
    pub fn link_data_mut(&mut self, id: LinkId) -> Option<&mut D> {
        self.links.get_mut(id).and_then(|l| l.data.as_mut())
    }

    /// Replace the application data of a link, returning the previous value.
    pub fn set_link_data(&mut self, id: LinkId, data: Option<D>) -> Option<D> {
        let link = self.links.get_mut(id)?;
        core::mem::replace(&mut link.data, data)
    }

    // --- painting ---

    /// Paint parameters for the current state. Runs a layout pass if needed.
    pub fn paint_plan(&mut self, host: &mut (impl LabelHost + ?Sized)) -> PaintPlan<'_> {
        self.ensure_layout(host);
        let Some(text_region) = self.geometry.text_region() else {
            return PaintPlan::Empty;
        };
        if !self.enabled {
            return PaintPlan::Disabled { text_region };
        }
        let cx = RenderContext {
            control_focused: self.focused,
            show_focus_cues: self.show_focus_cues,
            focus_link: self.focus_link,
            behavior: self.link_behavior,
            merged_focus_rect: if self.is_filled_by_one_link() {
                self.geometry.text_bounds()
            } else {
                None
            },
        };
        let links = self
            .links
            .iter()
            .filter_map(|link| {
                self.geometry
                    .region_of(link.id())
                    .map(|region| select_paint(link, region, &cx))
            })
            .collect();
        PaintPlan::Enabled { text_region, links }
    }

    // --- internals ---

    /// Exactly one link, spanning the whole text.
    pub(crate) fn is_filled_by_one_link(&self) -> bool {
        filled_by_one_link(&self.links, &self.text_run())
    }

    fn any_link_in_text(&self) -> bool {
        let run = self.text_run();
        self.links.iter().any(|l| l.text_range(&run).is_some())
    }

    /// Common tail of add, remove, and span changes.
    fn after_structural_change(
        &mut self,
        host: &mut (impl LabelHost + ?Sized),
    ) -> Result<(), LinkError> {
        self.geometry.invalidate();
        self.update_selectability(host);
        host.invalidate(None);
        self.links.validate(self.elements).inspect_err(|e| {
            tracing::warn!(%e, "overlapping links");
        })
    }

    /// Derive whether the control can take focus from the links inside the text.
    pub(crate) fn update_selectability(&mut self, host: &mut (impl LabelHost + ?Sized)) {
        let selectable = self.any_link_in_text();
        if !selectable {
            self.set_focus_link(None, host);
        }
        self.set_cursor_override(None, host);
        self.selectable = selectable;
        self.tab_stop = selectable;
    }

    /// Repaint the region of `link`, or the whole control.
    ///
    /// The whole control is repainted for `None`, for links without a cached region, and
    /// when one link fills the text (both are equivalent there, and whole is cheaper).
    pub(crate) fn invalidate_link(
        &self,
        link: Option<LinkId>,
        host: &mut (impl LabelHost + ?Sized),
    ) {
        let region = link.and_then(|id| self.geometry.region_of(id));
        match region {
            Some(region) if !self.is_filled_by_one_link() => {
                tracing::trace!(?link, "repaint link region");
                host.invalidate(Some(region));
            }
            _ => {
                tracing::trace!(?link, "repaint control");
                host.invalidate(None);
            }
        }
    }

    /// Move keyboard focus between links, repainting the old and the new focus link.
    pub(crate) fn set_focus_link(
        &mut self,
        link: Option<LinkId>,
        host: &mut (impl LabelHost + ?Sized),
    ) {
        if self.focus_link == link {
            return;
        }
        if let Some(old) = self.focus_link {
            self.invalidate_link(Some(old), host);
        }
        self.focus_link = link;
        if let Some(new) = link {
            self.invalidate_link(Some(new), host);
        }
        tracing::trace!(?link, "focus link changed");
    }

    pub(crate) fn set_cursor_override(
        &mut self,
        cursor: Option<CursorIcon>,
        host: &mut (impl LabelHost + ?Sized),
    ) {
        if self.cursor_override == cursor {
            return;
        }
        self.cursor_override = cursor;
        host.set_cursor_override(cursor);
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::test_util::{RecordingHost, cell_center};

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 200.0, 40.0);

    fn starts(label: &LinkLabel) -> Vec<usize> {
        label.links().iter().map(Link::start).collect()
    }

    #[test]
    fn first_link_replaces_the_whole_text_link() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("Hello world", BOUNDS);
        assert!(label.links().is_magic());
        assert!(label.is_selectable());

        let id = label.add_link(6, 5, &mut host).unwrap();
        assert_eq!(label.links().len(), 1);
        assert_eq!(label.links().first().map(Link::id), Some(id));
        assert_eq!(label.link_area(), LinkArea::new(6, 5));
    }

    #[test]
    fn out_of_range_spans_change_nothing() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("Hello", BOUNDS);
        assert_eq!(
            label.add_link(-1, 2, &mut host),
            Err(LinkError::Range { start: -1, length: 2 })
        );
        assert!(label.add_link(0, -2, &mut host).is_err());
        assert!(
            label
                .set_link_area(LinkArea::new(-3, 1), &mut host)
                .is_err()
        );
        assert!(label.links().is_magic());
        assert!(host.invalidations.is_empty());
    }

    #[test]
    fn overlap_is_reported_after_the_link_is_added() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("overlapping text", BOUNDS);
        let a = label.add_link(0, 5, &mut host).unwrap();
        let err = label.add_link(3, 4, &mut host).unwrap_err();
        let LinkError::Overlap { first, second } = err else {
            panic!("expected an overlap, got {err:?}");
        };
        assert_eq!(first, a);
        assert_eq!(label.links().len(), 2);

        // Removing one of them restores a valid registry.
        assert_eq!(label.remove_link(second, &mut host), Ok(true));
        assert_eq!(label.links().validate(16), Ok(()));
    }

    #[test]
    fn links_stay_sorted_by_start() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("aa bb cc dd", BOUNDS);
        label.add_link(9, 2, &mut host).unwrap();
        let b = label.add_link(3, 2, &mut host).unwrap();
        label.add_link(0, 2, &mut host).unwrap();
        assert_eq!(starts(&label), vec![0, 3, 9]);

        assert_eq!(label.set_link_span(b, 6, 2, &mut host), Ok(true));
        assert_eq!(starts(&label), vec![0, 6, 9]);
    }

    #[test]
    fn removing_the_focus_link_moves_focus_to_the_first() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("aaa bbb ccc", BOUNDS);
        let a = label.add_link(0, 3, &mut host).unwrap();
        label.add_link(4, 3, &mut host).unwrap();
        let c = label.add_link(8, 3, &mut host).unwrap();
        label.on_got_focus(&mut host);
        label.set_focus_link(Some(c), &mut host);

        assert_eq!(label.remove_link(c, &mut host), Ok(true));
        assert_eq!(label.focus_link(), Some(a));
        // Stale handles are ignored.
        assert_eq!(label.remove_link(c, &mut host), Ok(false));
        assert_eq!(label.remove_link_at(5, &mut host), Ok(false));

        label.clear_links(&mut host);
        assert_eq!(label.focus_link(), None);
        assert!(!label.is_selectable());
        assert_eq!(label.link_area(), LinkArea::default());
    }

    #[test]
    fn ids_of_another_label_change_nothing() {
        let mut host = RecordingHost::default();
        let mut a: LinkLabel = LinkLabel::new("aaa bbb", BOUNDS);
        let mut b: LinkLabel = LinkLabel::new("aaa bbb", BOUNDS);
        let id_a = a.add_link(0, 3, &mut host).unwrap();
        let id_b = b.add_link(4, 3, &mut host).unwrap();

        assert_eq!(b.remove_link(id_a, &mut host), Ok(false));
        assert!(!b.set_link_enabled(id_a, false, &mut host));
        assert!(!b.set_link_visited(id_a, true, &mut host));
        assert_eq!(b.set_link_span(id_a, 0, 1, &mut host), Ok(false));
        assert!(b.link(id_a).is_none());
        assert_eq!(b.links().len(), 1);
        assert!(b.link(id_b).is_some_and(|l| l.is_enabled() && !l.is_visited()));
        assert_eq!(b.link_area(), LinkArea::new(4, 3));
        assert!(a.link(id_a).is_some());
    }

    #[test]
    fn selectability_follows_links_inside_the_text() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("abc", BOUNDS);
        label
            .set_link_area(LinkArea::new(10, 2), &mut host)
            .unwrap();
        assert!(!label.is_selectable());
        assert!(!label.tab_stop());

        label.set_text("abcdefghijklm", &mut host);
        assert!(label.is_selectable());
        assert!(label.tab_stop());

        label.set_link_area(LinkArea::new(0, 0), &mut host).unwrap();
        assert!(label.links().is_empty());
        assert!(!label.is_selectable());
    }

    #[test]
    fn link_area_change_requests_relayout() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("Click here", BOUNDS);
        label.ensure_layout(&mut host);
        label
            .set_link_area(LinkArea::new(6, 4), &mut host)
            .unwrap();
        assert_eq!(host.relayouts, 1);
        assert_eq!(host.whole_repaints(), 1);
        assert!(!label.geometry().is_valid());

        // Setting the same area again is not a change.
        label
            .set_link_area(LinkArea::new(6, 4), &mut host)
            .unwrap();
        assert_eq!(host.relayouts, 1);
    }

    #[test]
    fn zero_length_links_are_valid_but_unselectable() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("abc", BOUNDS);
        label.add_link(1, 0, &mut host).unwrap();
        assert!(!label.is_selectable());
        assert!(label.add_link(1, 2, &mut host).is_ok());
        assert!(label.is_selectable());
        assert_eq!(
            label.hit_test(cell_center(1), &mut host),
            label.links().by_index(1).map(Link::id)
        );
    }

    #[test]
    fn huge_spans_on_multi_byte_text_are_outside_the_text() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("\u{1F600}", BOUNDS);
        let far = label.add_link(i64::MAX, i64::MAX, &mut host).unwrap();
        assert!(!label.is_selectable());
        assert!(label.ensure_layout(&mut host));
        assert!(label.geometry().region_of(far).is_none());
        assert_eq!(label.hit_test(cell_center(0), &mut host), None);

        label.remove_link(far, &mut host).unwrap();
        let all = label.add_link(0, i64::MAX, &mut host).unwrap();
        assert!(label.is_selectable());
        assert_eq!(label.hit_test(cell_center(0), &mut host), Some(all));
    }

    #[test]
    fn to_end_link_follows_text_changes() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("abc", BOUNDS);
        let magic = label.links().first().map(Link::id);
        assert_eq!(label.hit_test(cell_center(5), &mut host), None);
        label.set_text("abcdef", &mut host);
        assert_eq!(label.hit_test(cell_center(5), &mut host), magic);
    }

    #[test]
    fn text_and_font_changes_drop_the_layout() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("aaa bbb", BOUNDS);
        label.add_link(0, 3, &mut host).unwrap();
        assert!(label.ensure_layout(&mut host));
        assert!(!label.ensure_layout(&mut host));

        label.on_font_changed(&mut host);
        assert!(label.ensure_layout(&mut host));
        label.set_bounds(Rect::new(0.0, 0.0, 100.0, 40.0), &mut host);
        assert!(label.ensure_layout(&mut host));
        label.set_text("aaa ccc", &mut host);
        assert!(label.ensure_layout(&mut host));
        assert_eq!(host.measurer.range_calls, 4);
    }

    #[test]
    fn disabling_a_hovered_link_clears_its_pointer_state() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("Click here", BOUNDS);
        let id = label.add_link(6, 4, &mut host).unwrap();
        label.on_pointer_move(cell_center(7), &mut host);
        assert_eq!(host.cursor, Some(CursorIcon::Pointer));

        assert!(label.set_link_enabled(id, false, &mut host));
        assert_eq!(label.link(id).map(Link::state), Some(LinkState::NORMAL));
        assert_eq!(host.cursor, None);
        assert!(label.geometry().is_valid());
    }

    #[test]
    fn visited_shortcut_adds_a_link_when_there_is_none() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel = LinkLabel::new("abc", BOUNDS);
        label.clear_links(&mut host);
        assert!(!label.link_visited());

        label.set_link_visited_first(true, &mut host);
        assert!(label.link_visited());
        assert_eq!(label.link_area(), LinkArea::WHOLE_TEXT);
        assert!(label.is_selectable());
    }

    #[test]
    fn per_link_metadata() {
        let mut host = RecordingHost::default();
        let mut label: LinkLabel<&str> = LinkLabel::new("home away", BOUNDS);
        let home = label.add_link_with_data(0, 4, "/home", &mut host).unwrap();
        let away = label.add_link(5, 4, &mut host).unwrap();

        assert_eq!(label.link_data(home), Some(&"/home"));
        assert_eq!(label.link_data(away), None);
        assert_eq!(label.set_link_data(away, Some("/away")), None);
        assert_eq!(label.link_data(away), Some(&"/away"));

        assert!(label.set_link_name(away, Some("Away".to_string())));
        assert!(label.set_link_description(away, Some("Go away".to_string())));
        assert_eq!(label.links().index_of_key("AWAY"), Some(1));
        assert_eq!(
            label.link(away).and_then(Link::description),
            Some("Go away")
        );
    }
}
