// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Link label basics: add links, hover, and click.
//!
//! A fake monospace host lays out ASCII text in 10x20 cells. The label asks it for
//! link regions, then reports repaint, cursor, and click requests back to it.
//!
//! Run:
//! - `cargo run -p understory_link_label_demos --example link_label_basics`

use core::ops::Range;

use kurbo::{Point, Rect, Size};
use understory_link_label::{
    CursorIcon, LabelHost, LinkId, LinkLabel, LinkState, PointerButton, Region, TextMeasurer,
};

#[derive(Default)]
struct Host {
    repaints: Vec<Option<Rect>>,
    cursor: Option<CursorIcon>,
    clicked: Vec<(LinkId, PointerButton)>,
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
    fn invalidate(&mut self, region: Option<&Region>) {
        self.repaints.push(region.and_then(Region::bounding_box));
    }

    fn request_focus(&mut self) {}

    fn set_cursor_override(&mut self, cursor: Option<CursorIcon>) {
        self.cursor = cursor;
    }

    fn link_clicked(&mut self, link: LinkId, button: PointerButton) {
        self.clicked.push((link, button));
    }
}

fn center_of(index: usize) -> Point {
    Point::new(10.0 * index as f64 + 5.0, 10.0)
}

fn main() {
    let mut host = Host::default();
    let mut label: LinkLabel<&str> =
        LinkLabel::new("See docs or source", Rect::new(0.0, 0.0, 300.0, 20.0));

    // The whole text is one implicit link until the first real link is added.
    println!("== Initial ==\n  links: {:?}", label.link_area());
    let docs = label
        .add_link_with_data(4, 4, "https://docs.example", &mut host)
        .unwrap();
    let source = label
        .add_link_with_data(12, 6, "https://source.example", &mut host)
        .unwrap();
    println!("  after add: {} links", label.links().len());
    assert_eq!(label.links().len(), 2);
    host.repaints.clear();

    // Hover "docs".
    label.on_pointer_move(center_of(5), &mut host);
    println!(
        "== Hover ==\n  hit: {:?} state: {:?} cursor: {:?}",
        label.hit_test(center_of(5), &mut host),
        label.link(docs).map(|l| l.state()),
        host.cursor
    );
    assert_eq!(host.cursor, Some(CursorIcon::Pointer));

    // Hovering the gap between the links clears the cursor.
    label.on_pointer_move(center_of(10), &mut host);
    assert_eq!(host.cursor, None);

    // Click "source".
    label.on_pointer_move(center_of(14), &mut host);
    label.on_pointer_down(center_of(14), PointerButton::Primary, 1, &mut host);
    assert!(
        label
            .link(source)
            .is_some_and(|l| l.state().contains(LinkState::ACTIVE))
    );
    label.on_pointer_up(center_of(14), PointerButton::Primary, 1, &mut host);
    let (clicked, _) = host.clicked[0];
    println!(
        "== Click ==\n  clicked {:?} -> {:?}",
        clicked,
        label.link_data(clicked)
    );
    assert_eq!(clicked, source);

    // The application marks it visited.
    label.set_link_visited(source, true, &mut host);

    // Only link regions were repainted, never the whole control.
    println!("== Repaints ==");
    for r in &host.repaints {
        println!("  {:?}", r);
    }
    assert!(host.repaints.iter().all(Option::is_some));
}
