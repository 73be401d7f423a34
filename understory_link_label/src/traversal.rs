// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard traversal among links.
//!
//! ## Eligibility
//!
//! A link can take focus when it is enabled and its span lies inside the text (non-empty,
//! starting before the end). Disabled links and out-of-range links are skipped the same
//! way: the scan treats "disabled" and "outside the text" as one condition and never
//! distinguishes them.
//!
//! ## Wraparound
//!
//! [`focus_next`] stops at the ends of the registry. Callers that cycle (Tab at the last
//! link) re-scan once from outside the registry.

use crate::registry::{Link, LinkRegistry};
use crate::text::TextRun;

/// Whether `link` can take keyboard focus in `run`.
pub fn is_focusable<D>(link: &Link<D>, run: &TextRun<'_>) -> bool {
    link.is_enabled() && link.text_range(run).is_some()
}

/// Storage index of the next focusable link.
///
/// Scans forward from just past `from`, or backward from just before it. `from = None`
/// starts outside the registry: before the first link when moving forward, after the last
/// link when moving backward. Returns `None` when an end is reached without a match.
pub fn focus_next<D>(
    links: &LinkRegistry<D>,
    run: &TextRun<'_>,
    from: Option<usize>,
    forward: bool,
) -> Option<usize> {
    let eligible = |i: &usize| links.by_index(*i).is_some_and(|l| is_focusable(l, run));
    if forward {
        let begin = from.map_or(0, |f| f.saturating_add(1));
        (begin..links.len()).find(eligible)
    } else {
        let end = from.map_or(links.len(), |f| f.min(links.len()));
        (0..end).rev().find(eligible)
    }
}

/// [`focus_next`], re-scanning once from outside the registry when an end is reached.
pub fn focus_next_wrapping<D>(
    links: &LinkRegistry<D>,
    run: &TextRun<'_>,
    from: Option<usize>,
    forward: bool,
) -> Option<usize> {
    focus_next(links, run, from, forward).or_else(|| {
        from?;
        focus_next(links, run, None, forward)
    })
}
