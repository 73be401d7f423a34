// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard focus: Tab through links, skip disabled ones, activate with Enter,
//! and build a paint plan with focus rectangles.
//!
//! Run:
//! - `cargo run -p understory_link_label_demos --example link_label_focus`

use core::ops::Range;

use kurbo::{Rect, Size};
use understory_link_label::{
    ColorRole, CursorIcon, Key, LabelHost, LinkId, LinkLabel, Modifiers, PaintPlan,
    PointerButton, Region, TextMeasurer,
};

#[derive(Default)]
struct Host {
    focus_requests: usize,
    clicked: Vec<LinkId>,
}

fn span(b: Rect, r: Range<usize>) -> Region {
    Region::from_rect(Rect::new(
        b.x0 + 10.0 * r.start as f64,
        b.y0,
        b.x0 + 10.0 * r.end as f64,
        b.y0 + 20.0,
    ))
}

impl TextMeasurer for Host {
    fn measure_ranges(&mut self, text: &str, b: Rect, ranges: &[Range<usize>]) -> Vec<Region> {
        let mut out: Vec<Region> = ranges.iter().map(|r| span(b, r.clone())).collect();
        out.push(span(b, 0..text.len()));
        out
    }

    fn measure_text(&mut self, text: &str, _b: Rect) -> Size {
        Size::new(10.0 * text.len() as f64, 20.0)
    }
}

impl LabelHost for Host {
    fn invalidate(&mut self, _region: Option<&Region>) {}

    fn request_focus(&mut self) {
        self.focus_requests += 1;
    }

    fn set_cursor_override(&mut self, _cursor: Option<CursorIcon>) {}

    fn link_clicked(&mut self, link: LinkId, _button: PointerButton) {
        self.clicked.push(link);
    }
}

fn main() {
    let mut host = Host::default();
    let mut label: LinkLabel = LinkLabel::new("one two three", Rect::new(0.0, 0.0, 200.0, 20.0));
    let one = label.add_link(0, 3, &mut host).unwrap();
    let two = label.add_link(4, 3, &mut host).unwrap();
    let three = label.add_link(8, 5, &mut host).unwrap();
    label.set_link_enabled(two, false, &mut host);

    // Focus arrives from outside: the first focusable link is picked.
    label.select(true, true, &mut host);
    println!("== Focus in ==\n  focus: {:?}", label.focus_link());
    assert_eq!(label.focus_link(), Some(one));

    // Tab skips the disabled link.
    assert!(label.process_dialog_key(Key::Tab, Modifiers::empty(), &mut host));
    println!("== Tab ==\n  focus: {:?}", label.focus_link());
    assert_eq!(label.focus_link(), Some(three));

    // Enter activates the focus link.
    label.on_key_down(Key::Enter, &mut host);
    assert_eq!(host.clicked, [three]);

    if let PaintPlan::Enabled { links, .. } = label.paint_plan(&mut host) {
        println!("== Paint ==");
        for p in &links {
            println!(
                "  {:?}: color {:?}, underline {}, focus rects {:?}",
                p.link, p.color, p.underline, p.focus_rects
            );
        }
        assert_eq!(links[1].color, ColorRole::Disabled);
        assert_eq!(links[2].focus_rects.len(), 1);
    }

    // Tab past the last link leaves the control.
    assert!(!label.process_dialog_key(Key::Tab, Modifiers::empty(), &mut host));
    assert_eq!(label.focus_link(), None);
}
