// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam: everything the link label asks of the surrounding toolkit.

use cursor_icon::CursorIcon;

use crate::geometry::{Region, TextMeasurer};
use crate::types::{LinkId, PointerButton};

/// Services the toolkit provides to a [`LinkLabel`](crate::LinkLabel).
///
/// Every entry point of the label that can change state takes the host as an argument
/// and calls back into it synchronously. The label never stores the host.
pub trait LabelHost: TextMeasurer {
    /// Repaint `region`, or the whole control for `None`.
    ///
    /// The region is borrowed from the label's geometry cache and is only valid for the
    /// duration of the call.
    fn invalidate(&mut self, region: Option<&Region>);

    /// Give the control keyboard focus. The toolkit later reports it with
    /// [`LinkLabel::on_got_focus`](crate::LinkLabel::on_got_focus).
    fn request_focus(&mut self);

    /// Override the pointer cursor while it is over the control, or restore the default.
    fn set_cursor_override(&mut self, cursor: Option<CursorIcon>);

    /// Start or stop capturing pointer events outside the control bounds.
    fn set_capture(&mut self, captured: bool) {
        let _ = captured;
    }

    /// The preferred size of the control may have changed.
    fn request_relayout(&mut self) {}

    /// A link was activated by the pointer or the keyboard.
    fn link_clicked(&mut self, link: LinkId, button: PointerButton);
}
