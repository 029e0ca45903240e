// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

/// An opaque image embedded in the document. It occupies exactly one document offset
/// and reads back as [`OBJECT_REPLACEMENT_CHAR`] from [`TextSurface::text`].
///
/// Pixel data is reference counted so that the same image can be printed repeatedly
/// without copying.
///
/// [`OBJECT_REPLACEMENT_CHAR`]: crate::OBJECT_REPLACEMENT_CHAR
/// [`TextSurface::text`]: crate::TextSurface::text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmbeddedImage {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
}

impl EmbeddedImage {
    pub fn new(
        arg_label: impl Into<String>,
        width: u32,
        height: u32,
        arg_data: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            label: arg_label.into(),
            width,
            height,
            data: arg_data.into(),
        }
    }
}
