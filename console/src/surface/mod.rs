// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The document the console edits. [`TextSurface`] is the seam between the line editor
//! and whatever actually renders text; [`MemorySurface`] is the in-memory
//! implementation used by the demo and the tests.

// Attach sources.
pub mod embedded_image;
pub mod memory_surface;
pub mod text_style;
pub mod text_surface;

// Re-export.
pub use embedded_image::*;
pub use memory_surface::*;
pub use text_style::*;
pub use text_surface::*;
