// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by link registry mutations.

use crate::types::LinkId;

/// Errors reported by [`LinkLabel`](crate::LinkLabel) mutations.
///
/// Both variants describe programmer errors in the supplied spans, not runtime conditions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// A span had a negative start or a length below `-1`. Nothing was changed.
    #[error("link span ({start}, {length}) is out of range: start must be >= 0 and length >= -1")]
    Range {
        /// The rejected start.
        start: i64,
        /// The rejected length.
        length: i64,
    },
    /// Two links cover intersecting text.
    ///
    /// Detected after the mutation has been applied; the registry keeps the overlapping
    /// links until the caller removes or moves one of them.
    #[error("links {first:?} and {second:?} overlap")]
    Overlap {
        /// The link that starts first.
        first: LinkId,
        /// The link it overlaps.
        second: LinkId,
    },
}
