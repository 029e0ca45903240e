// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Range;

use crate::{ConsoleKeyEvent, EmbeddedImage, StyleApplication, SurfaceError, TextStyle};

/// What [`TextSurface::text`] returns for an offset that holds an [`EmbeddedImage`].
pub const OBJECT_REPLACEMENT_CHAR: char = '\u{FFFC}';

/// A styled text document with a caret and an optional selection. This is the only
/// thing the line editor knows about rendering.
///
/// # Offsets
///
/// Offsets count characters (Unicode scalar values), not bytes. An embedded image
/// occupies one offset. Valid caret positions are `0..=len()`.
///
/// # Caret and selection
///
/// The selection is the range between the caret (the "dot") and an anchor (the
/// "mark"). [`set_caret`] collapses it; [`move_caret`] moves only the dot, which is how
/// a shifted movement extends a selection.
///
/// # Edits
///
/// [`replace_range`] and [`insert_image`] shift the caret and the anchor like a text
/// widget does: positions after the edited range move with the text, positions inside
/// a removed range end up right after the inserted content.
///
/// [`set_caret`]: TextSurface::set_caret
/// [`move_caret`]: TextSurface::move_caret
/// [`replace_range`]: TextSurface::replace_range
/// [`insert_image`]: TextSurface::insert_image
pub trait TextSurface: Send {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool { self.len() == 0 }

    fn caret(&self) -> usize;

    /// Places the caret and collapses the selection. Offsets past the end are clamped.
    fn set_caret(&mut self, offset: usize);

    /// Moves the caret while keeping the selection anchor. Offsets past the end are
    /// clamped.
    fn move_caret(&mut self, offset: usize);

    /// The selected range, if it is not empty.
    fn selection(&self) -> Option<Range<usize>>;

    /// # Errors
    ///
    /// [`SurfaceError::BadLocation`] when the range is not inside the document.
    fn text(&self, range: Range<usize>) -> Result<String, SurfaceError>;

    /// Replace `range` with `text`, using the current input style for the new
    /// characters.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::BadLocation`] when the range is not inside the document.
    fn replace_range(&mut self, range: Range<usize>, text: &str)
    -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// [`SurfaceError::BadLocation`] when `offset > len()`.
    fn insert_image(
        &mut self,
        offset: usize,
        image: &EmbeddedImage,
    ) -> Result<(), SurfaceError>;

    /// The style that newly inserted characters get.
    fn character_style(&self) -> TextStyle;

    fn set_character_style(&mut self, style: &TextStyle, how: StyleApplication);

    /// Default editing for a key the line editor did not consume: typing, deletion and
    /// caret movement. Only presses have an effect.
    fn apply_native_key(&mut self, event: &ConsoleKeyEvent);

    /// Show (or hide) a busy indicator. Surfaces without one ignore this.
    fn set_wait_feedback(&mut self, _is_waiting: bool) {}
}
