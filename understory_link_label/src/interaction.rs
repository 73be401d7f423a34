// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer, keyboard, and focus handling.
//!
//! ## Redraw granularity
//!
//! Every transition asks the host to repaint only the cached region of the affected link.
//! The whole control is repainted only when one link fills the text, or when the link has
//! no region yet.
//!
//! ## Hover
//!
//! Hover follows the pointer onto any link, including disabled ones; the cursor override
//! is [`CursorIcon::Pointer`] only while the hovered link is enabled. Hover changes repaint
//! only when the underline behavior makes hovered links look different.
//!
//! ## Double clicks
//!
//! A press with a click count above one (or a press while the control is disabled) sets a
//! control-wide flag that swallows the next release, wherever it happens.

use alloc::vec::Vec;

use cursor_icon::CursorIcon;
use kurbo::Point;

use crate::host::LabelHost;
use crate::label::LinkLabel;
use crate::registry::Link;
use crate::traversal::{focus_next, focus_next_wrapping};
use crate::types::{Key, LinkId, LinkState, Modifiers, PointerButton};

impl<D> LinkLabel<D> {
    /// The link under `pt`, running a layout pass first if needed.
    ///
    /// Zero-length links and links outside the text have no region and are never hit.
    pub fn hit_test(&mut self, pt: Point, host: &mut (impl LabelHost + ?Sized)) -> Option<LinkId> {
        self.ensure_layout(host);
        self.geometry.hit_test(pt)
    }

    fn link_with(&self, flag: LinkState) -> Option<LinkId> {
        self.links
            .iter()
            .find(|l| l.state.contains(flag))
            .map(Link::id)
    }

    /// The pointer moved to `pt`.
    pub fn on_pointer_move(&mut self, pt: Point, host: &mut (impl LabelHost + ?Sized)) {
        if !self.enabled {
            return;
        }
        let hovered = self.link_with(LinkState::HOVER);
        let hit = self.hit_test(pt, host);
        if hit == hovered {
            return;
        }

        if let Some(link) = hovered.and_then(|id| self.links.get_mut(id)) {
            link.state.remove(LinkState::HOVER);
        }
        let cursor = match hit.and_then(|id| self.links.get_mut(id)) {
            Some(link) => {
                link.state.insert(LinkState::HOVER);
                link.enabled.then_some(CursorIcon::Pointer)
            }
            None => None,
        };
        tracing::trace!(from = ?hovered, to = ?hit, "hover moved");
        self.set_cursor_override(cursor, host);

        if self.link_behavior.hover_font_differs() {
            if let Some(old) = hovered {
                self.invalidate_link(Some(old), host);
            }
            if let Some(new) = hit {
                self.invalidate_link(Some(new), host);
            }
        }
    }

    /// A pointer button went down at `pt`. `click_count` is 1 for a single click.
    ///
    /// Only the primary button presses links. Pressing a link requests focus for the
    /// control; an enabled link also becomes the focus link. Pointer capture starts until
    /// the matching release.
    pub fn on_pointer_down(
        &mut self,
        pt: Point,
        button: PointerButton,
        click_count: u32,
        host: &mut (impl LabelHost + ?Sized),
    ) {
        if !self.enabled || click_count > 1 {
            self.received_double_click = true;
            return;
        }
        if button != PointerButton::Primary {
            return;
        }
        // Hosts that skip the move before a press still get hover at the press position.
        self.on_pointer_move(pt, host);

        let Some(link) = self
            .links
            .iter_mut()
            .find(|l| l.state.contains(LinkState::HOVER))
        else {
            return;
        };
        link.state.insert(LinkState::ACTIVE);
        let (id, enabled) = (link.id(), link.enabled);
        tracing::trace!(?id, "link pressed");

        host.request_focus();
        if enabled {
            if self.focus_link == Some(id) {
                self.invalidate_link(Some(id), host);
            } else {
                self.set_focus_link(Some(id), host);
            }
        }
        self.captured = true;
        host.set_capture(true);
    }

    /// A pointer button was released at `pt`.
    ///
    /// Fires [`LabelHost::link_clicked`] when the release lands inside the pressed link and
    /// that link is the enabled focus link.
    pub fn on_pointer_up(
        &mut self,
        pt: Point,
        button: PointerButton,
        click_count: u32,
        host: &mut (impl LabelHost + ?Sized),
    ) {
        if !self.enabled || click_count > 1 || self.received_double_click {
            self.received_double_click = false;
            return;
        }

        let pressed: Vec<LinkId> = self
            .links
            .iter()
            .filter(|l| l.state.contains(LinkState::ACTIVE))
            .map(Link::id)
            .collect();
        for id in pressed {
            let Some(link) = self.links.get_mut(id) else {
                continue;
            };
            link.state.remove(LinkState::ACTIVE);
            let enabled = link.enabled;
            self.invalidate_link(Some(id), host);
            if self.captured {
                self.captured = false;
                host.set_capture(false);
            }

            let released_on = self.hit_test(pt, host);
            if released_on == Some(id) && self.focus_link == Some(id) && enabled {
                tracing::debug!(?id, ?button, "link clicked");
                host.link_clicked(id, button);
            }
        }
    }

    /// The pointer left the control.
    ///
    /// Clears hover and press on every link that has either, not only the last hovered one.
    pub fn on_pointer_leave(&mut self, host: &mut (impl LabelHost + ?Sized)) {
        if !self.enabled {
            return;
        }
        let mut cleared = Vec::new();
        for link in self.links.iter_mut() {
            if link.state.intersects(LinkState::TRANSIENT) {
                cleared.push((link.id(), link.state.contains(LinkState::ACTIVE)));
                link.state.remove(LinkState::TRANSIENT);
            }
        }
        self.set_cursor_override(None, host);
        let hover_differs = self.link_behavior.hover_font_differs();
        for (id, was_active) in cleared {
            if was_active || hover_differs {
                self.invalidate_link(Some(id), host);
            }
        }
    }

    /// A key went down while the control has focus. Enter activates the focus link.
    pub fn on_key_down(&mut self, key: Key, host: &mut (impl LabelHost + ?Sized)) {
        if key != Key::Enter {
            return;
        }
        let Some(link) = self.focus_link.and_then(|id| self.links.get(id)) else {
            return;
        };
        if link.is_enabled() {
            tracing::debug!(id = ?link.id(), "link activated by keyboard");
            host.link_clicked(link.id(), PointerButton::Primary);
        }
    }

    /// Navigation keys. Returns `true` if the key was consumed.
    ///
    /// Tab (when [`tab_stop`](LinkLabel::tab_stop) is set) and the arrow keys move focus
    /// between links without wrapping. At either end the focus link is cleared and the key
    /// is not consumed, so the toolkit can move focus to the next control. Keys pressed
    /// with Alt alone are never consumed.
    pub fn process_dialog_key(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        host: &mut (impl LabelHost + ?Sized),
    ) -> bool {
        if modifiers.intersection(Modifiers::ALT | Modifiers::CONTROL) == Modifiers::ALT {
            return false;
        }
        match key {
            Key::Tab => {
                self.tab_stop && self.focus_next_link(!modifiers.contains(Modifiers::SHIFT), host)
            }
            Key::Up | Key::Left => self.focus_next_link(false, host),
            Key::Down | Key::Right => self.focus_next_link(true, host),
            Key::Enter | Key::Other => false,
        }
    }

    /// Move focus to the next or previous focusable link. Returns `false` (and clears the
    /// focus link) at the end of the links.
    pub fn focus_next_link(&mut self, forward: bool, host: &mut (impl LabelHost + ?Sized)) -> bool {
        let from = self.focus_link.and_then(|id| self.links.index_of(id));
        let next = focus_next(&self.links, &self.text_run(), from, forward)
            .and_then(|i| self.links.by_index(i))
            .map(Link::id);
        self.set_focus_link(next, host);
        next.is_some()
    }

    /// Focus the control.
    ///
    /// With `directed` set the focus link is chosen by traversal: when focus enters from
    /// outside the control the first (or, backward, the last) focusable link is picked;
    /// otherwise the scan continues from the current focus link and wraps once.
    pub fn select(&mut self, directed: bool, forward: bool, host: &mut (impl LabelHost + ?Sized)) {
        if directed && !self.links.is_empty() {
            let from = if self.focused {
                self.focus_link.and_then(|id| self.links.index_of(id))
            } else {
                None
            };
            let next = focus_next_wrapping(&self.links, &self.text_run(), from, forward)
                .and_then(|i| self.links.by_index(i))
                .map(Link::id);
            // Focus may come from the control itself, so the old focus link is repainted too.
            self.set_focus_link(None, host);
            self.set_focus_link(next, host);
        }
        host.request_focus();
        self.on_got_focus(host);
    }

    /// The control received keyboard focus.
    ///
    /// Without a focus link the first focusable link is selected. Selecting re-enters this
    /// handler; the nested call only records the focus.
    pub fn on_got_focus(&mut self, host: &mut (impl LabelHost + ?Sized)) {
        self.focused = true;
        if self.processing_got_focus {
            return;
        }
        self.processing_got_focus = true;
        match self.focus_link {
            None => self.select(true, true, host),
            Some(id) => self.invalidate_link(Some(id), host),
        }
        self.processing_got_focus = false;
    }

    /// The control lost keyboard focus. The focus link is kept but repainted.
    pub fn on_lost_focus(&mut self, host: &mut (impl LabelHost + ?Sized)) {
        self.focused = false;
        if let Some(id) = self.focus_link {
            self.invalidate_link(Some(id), host);
        }
    }

    /// Enable or disable the whole control.
    ///
    /// Disabling clears hover and press on every link and the cursor override. Layout is
    /// kept; only appearance changes.
    pub fn set_enabled(&mut self, enabled: bool, host: &mut (impl LabelHost + ?Sized)) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            for link in self.links.iter_mut() {
                link.state.remove(LinkState::TRANSIENT);
            }
            self.set_cursor_override(None, host);
            if self.captured {
                self.captured = false;
                host.set_capture(false);
            }
        }
        tracing::debug!(enabled, "control enabled changed");
        host.invalidate(None);
    }

    /// Activate the focus link as if it was clicked, focusing the first focusable link
    /// when there is none. Returns `true` if a click fired.
    pub fn perform_click(&mut self, host: &mut (impl LabelHost + ?Sized)) -> bool {
        if self.focus_link.is_none() {
            let first = focus_next(&self.links, &self.text_run(), None, true)
                .and_then(|i| self.links.by_index(i))
                .map(Link::id);
            self.set_focus_link(first, host);
        }
        match self.focus_link {
            Some(id) => {
                host.link_clicked(id, PointerButton::Primary);
                true
            }
            None => false,
        }
    }
}
