// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_link_label::{
    CursorIcon, LabelConfig, LabelHost, LinkId, LinkLabel, PointerButton, Region, TextMeasurer,
};

const CELL: f64 = 8.0;
const LINE: f64 = 16.0;
const COLUMNS: usize = 80;

/// Monospace ASCII layout wrapping at `COLUMNS`; counts repaint requests.
#[derive(Default)]
struct BenchHost {
    repaints: usize,
    clicks: usize,
}

fn cell_rect(b: Rect, i: usize) -> Rect {
    let (line, col) = (i / COLUMNS, i % COLUMNS);
    let x0 = b.x0 + col as f64 * CELL;
    let y0 = b.y0 + line as f64 * LINE;
    Rect::new(x0, y0, x0 + CELL, y0 + LINE)
}

fn span_region(b: Rect, r: Range<usize>) -> Region {
    let mut rects: Vec<Rect> = Vec::new();
    for i in r {
        let cell = cell_rect(b, i);
        match rects.last_mut() {
            Some(last) if last.y0 == cell.y0 => *last = last.union(cell),
            _ => rects.push(cell),
        }
    }
    Region::new(rects)
}

impl TextMeasurer for BenchHost {
    fn measure_ranges(&mut self, text: &str, b: Rect, ranges: &[Range<usize>]) -> Vec<Region> {
        let mut out: Vec<Region> = ranges.iter().map(|r| span_region(b, r.clone())).collect();
        out.push(span_region(b, 0..text.len()));
        out
    }

    fn measure_text(&mut self, text: &str, _b: Rect) -> Size {
        let n = text.len();
        let lines = n.div_ceil(COLUMNS).max(1);
        Size::new(n.min(COLUMNS) as f64 * CELL, lines as f64 * LINE)
    }
}

impl LabelHost for BenchHost {
    fn invalidate(&mut self, _region: Option<&Region>) {
        self.repaints += 1;
    }

    fn request_focus(&mut self) {}

    fn set_cursor_override(&mut self, _cursor: Option<CursorIcon>) {}

    fn link_clicked(&mut self, _link: LinkId, _button: PointerButton) {
        self.clicks += 1;
    }
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

const BOUNDS: Rect = Rect::new(0.0, 0.0, COLUMNS as f64 * CELL, 64.0 * LINE);

/// `n` links of 5 characters separated by single spaces.
fn linked_label(n: usize, host: &mut BenchHost) -> LinkLabel {
    let text = "word ".repeat(n);
    let mut label = LinkLabel::new(text, BOUNDS);
    for i in 0..n {
        let _ = label.add_link((i * 5) as i64, 4, host);
    }
    label
}

fn random_points(count: usize, seed: u64, height: f64) -> Vec<Point> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * BOUNDS.width(), rng.next_f64() * height))
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for &n in &[16usize, 128, 512] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("per_range_n{}", n), |b| {
            let mut host = BenchHost::default();
            let mut label = linked_label(n, &mut host);
            b.iter(|| {
                label.on_font_changed(&mut host);
                black_box(label.ensure_layout(&mut host));
            })
        });
    }
    for fast in [true, false] {
        let config = LabelConfig {
            single_rect_fast_path: fast,
            ..LabelConfig::default()
        };
        let mut host = BenchHost::default();
        let mut label: LinkLabel = LinkLabel::with_config("x".repeat(2000), BOUNDS, config);
        group.bench_function(format!("whole_text_link_fast{}", fast), |b| {
            b.iter(|| {
                label.on_font_changed(&mut host);
                black_box(label.ensure_layout(&mut host));
            })
        });
    }
    group.finish();
}

fn bench_pointer(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer");
    for &n in &[16usize, 128, 512] {
        let height = (n * 5).div_ceil(COLUMNS) as f64 * LINE;
        let points = random_points(1024, 0x5eed_0000 + n as u64, height);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("move_sweep_n{}", n), |b| {
            let mut host = BenchHost::default();
            let mut label = linked_label(n, &mut host);
            label.ensure_layout(&mut host);
            b.iter(|| {
                for &pt in &points {
                    label.on_pointer_move(pt, &mut host);
                }
                label.on_pointer_leave(&mut host);
                black_box(host.repaints);
            })
        });
        group.bench_function(format!("click_sweep_n{}", n), |b| {
            let mut host = BenchHost::default();
            let mut label = linked_label(n, &mut host);
            b.iter(|| {
                for &pt in &points {
                    label.on_pointer_down(pt, PointerButton::Primary, 1, &mut host);
                    label.on_pointer_up(pt, PointerButton::Primary, 1, &mut host);
                }
                black_box(host.clicks);
            })
        });
    }
    group.finish();
}

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    for &n in &[16usize, 128] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("add_links_n{}", n), |b| {
            b.iter_batched(
                BenchHost::default,
                |mut host| {
                    let label = linked_label(n, &mut host);
                    black_box(label.links().len());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("tab_cycle_n{}", n), |b| {
            let mut host = BenchHost::default();
            let mut label = linked_label(n, &mut host);
            b.iter(|| {
                label.on_got_focus(&mut host);
                while label.focus_next_link(true, &mut host) {}
                label.on_lost_focus(&mut host);
                black_box(label.focus_link());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_pointer, bench_registry);
criterion_main!(benches);
