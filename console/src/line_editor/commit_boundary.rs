// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Range;

/// Offset that splits the document into committed content (left) and the editable tail
/// (right). Always `<=` the document length.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitBoundary(usize);

impl CommitBoundary {
    #[must_use]
    pub fn offset(self) -> usize { self.0 }

    /// Commit everything up to `document_len`.
    pub fn reset_to(&mut self, document_len: usize) { self.0 = document_len; }

    /// Pull the boundary back if the document shrank under it.
    pub fn clamp_to(&mut self, document_len: usize) { self.0 = self.0.min(document_len); }

    #[must_use]
    pub fn is_editable(self, offset: usize) -> bool { offset >= self.0 }

    /// Does `range` start in the committed region?
    #[must_use]
    pub fn starts_before(self, range: &Range<usize>) -> bool { range.start < self.0 }
}

impl From<CommitBoundary> for usize {
    fn from(it: CommitBoundary) -> Self { it.0 }
}
