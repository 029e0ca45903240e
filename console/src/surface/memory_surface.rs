// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{ops::Range, sync::Arc};

use crate::{ConsoleKey, ConsoleKeyEvent, EmbeddedImage, OBJECT_REPLACEMENT_CHAR,
            StyleApplication, SurfaceError, TextStyle, TextSurface,
            report_location_error};

#[derive(Debug, Clone, PartialEq, Eq)]
enum CellContent {
    Char(char),
    Image(EmbeddedImage),
}

/// One document offset. Styles are shared between all the cells inserted with the same
/// input style.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StyledCell {
    content: CellContent,
    style: Arc<TextStyle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunContent {
    Text(String),
    Image(EmbeddedImage),
}

/// Maximal sequence of adjacent characters that share a style. Every image is a run of
/// its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub content: RunContent,
    pub style: TextStyle,
}

/// In-memory [`TextSurface`]. A renderer (such as the crossterm demo) can paint it from
/// [`MemorySurface::styled_runs`].
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    cells: Vec<StyledCell>,
    /// Caret.
    dot: usize,
    /// Selection anchor.
    mark: usize,
    input_style: Arc<TextStyle>,
    is_waiting: bool,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Surface pre-filled with unstyled text, caret at the end.
    #[must_use]
    pub fn with_text(arg_text: impl AsRef<str>) -> Self {
        let mut it = Self::new();
        it.type_text(arg_text.as_ref());
        it
    }

    #[must_use]
    pub fn full_text(&self) -> String {
        self.cells
            .iter()
            .map(|cell| match &cell.content {
                CellContent::Char(ch) => *ch,
                CellContent::Image(_) => OBJECT_REPLACEMENT_CHAR,
            })
            .collect()
    }

    #[must_use]
    pub fn style_at(&self, offset: usize) -> Option<&TextStyle> {
        self.cells.get(offset).map(|cell| cell.style.as_ref())
    }

    #[must_use]
    pub fn image_at(&self, offset: usize) -> Option<&EmbeddedImage> {
        match self.cells.get(offset).map(|cell| &cell.content) {
            Some(CellContent::Image(image)) => Some(image),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_waiting(&self) -> bool { self.is_waiting }

    #[must_use]
    pub fn styled_runs(&self) -> Vec<StyledRun> {
        let mut runs: Vec<StyledRun> = vec![];

        for cell in &self.cells {
            match &cell.content {
                CellContent::Image(image) => runs.push(StyledRun {
                    content: RunContent::Image(image.clone()),
                    style: cell.style.as_ref().clone(),
                }),
                CellContent::Char(ch) => {
                    let continues_last_run = matches!(
                        runs.last(),
                        Some(StyledRun { content: RunContent::Text(_), style })
                            if style == cell.style.as_ref()
                    );
                    if continues_last_run {
                        if let Some(StyledRun {
                            content: RunContent::Text(text),
                            ..
                        }) = runs.last_mut()
                        {
                            text.push(*ch);
                        }
                    } else {
                        runs.push(StyledRun {
                            content: RunContent::Text(ch.to_string()),
                            style: cell.style.as_ref().clone(),
                        });
                    }
                }
            }
        }

        runs
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), SurfaceError> {
        let len = self.cells.len();
        if range.start <= range.end && range.end <= len {
            Ok(())
        } else {
            Err(SurfaceError::BadLocation {
                start: range.start,
                end: range.end,
                len,
            })
        }
    }

    fn shift_position(position: usize, range: &Range<usize>, inserted: usize) -> usize {
        if position < range.start {
            position
        } else if position >= range.end {
            position - range.len() + inserted
        } else {
            range.start + inserted
        }
    }

    fn splice_cells(&mut self, range: Range<usize>, new_cells: Vec<StyledCell>) {
        let inserted = new_cells.len();
        self.cells.splice(range.clone(), new_cells);
        self.dot = Self::shift_position(self.dot, &range, inserted);
        self.mark = Self::shift_position(self.mark, &range, inserted);
    }

    /// Replace the selection (or insert at the caret) like typing does.
    fn type_text(&mut self, text: &str) {
        let range = self.selection().unwrap_or(self.dot..self.dot);
        if let Err(error) = self.replace_range(range, text) {
            report_location_error(&error);
        }
    }

    fn delete(&mut self, range: Range<usize>) {
        if let Err(error) = self.replace_range(range, "") {
            report_location_error(&error);
        }
    }
}

impl TextSurface for MemorySurface {
    fn len(&self) -> usize { self.cells.len() }

    fn caret(&self) -> usize { self.dot }

    fn set_caret(&mut self, offset: usize) {
        let offset = offset.min(self.cells.len());
        self.dot = offset;
        self.mark = offset;
    }

    fn move_caret(&mut self, offset: usize) { self.dot = offset.min(self.cells.len()); }

    fn selection(&self) -> Option<Range<usize>> {
        match self.dot.cmp(&self.mark) {
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Less => Some(self.dot..self.mark),
            std::cmp::Ordering::Greater => Some(self.mark..self.dot),
        }
    }

    fn text(&self, range: Range<usize>) -> Result<String, SurfaceError> {
        self.check_range(&range)?;
        Ok(self.cells[range]
            .iter()
            .map(|cell| match &cell.content {
                CellContent::Char(ch) => *ch,
                CellContent::Image(_) => OBJECT_REPLACEMENT_CHAR,
            })
            .collect())
    }

    fn replace_range(
        &mut self,
        range: Range<usize>,
        text: &str,
    ) -> Result<(), SurfaceError> {
        self.check_range(&range)?;
        let new_cells = text
            .chars()
            .map(|ch| StyledCell {
                content: CellContent::Char(ch),
                style: Arc::clone(&self.input_style),
            })
            .collect();
        self.splice_cells(range, new_cells);
        Ok(())
    }

    fn insert_image(
        &mut self,
        offset: usize,
        image: &EmbeddedImage,
    ) -> Result<(), SurfaceError> {
        self.check_range(&(offset..offset))?;
        let cell = StyledCell {
            content: CellContent::Image(image.clone()),
            style: Arc::clone(&self.input_style),
        };
        self.splice_cells(offset..offset, vec![cell]);
        Ok(())
    }

    fn character_style(&self) -> TextStyle { self.input_style.as_ref().clone() }

    fn set_character_style(&mut self, style: &TextStyle, how: StyleApplication) {
        let new_style = match how {
            StyleApplication::Merge => self.input_style.merged_with(style),
            StyleApplication::Replace => style.clone(),
        };
        self.input_style = Arc::new(new_style);
    }

    fn apply_native_key(&mut self, event: &ConsoleKeyEvent) {
        if !event.is_press() {
            return;
        }

        let is_plain_typing = event.mask.is_plain_typing();
        let is_extending = event.mask.is_shift_pressed();
        let len = self.cells.len();

        match event.key {
            ConsoleKey::Char(ch) if is_plain_typing => self.type_text(&ch.to_string()),
            ConsoleKey::Tab if is_plain_typing => self.type_text("\t"),
            ConsoleKey::Enter if is_plain_typing => self.type_text("\n"),
            ConsoleKey::Backspace => match self.selection() {
                Some(selection) => self.delete(selection),
                None if self.dot > 0 => self.delete(self.dot - 1..self.dot),
                None => {}
            },
            ConsoleKey::Delete => match self.selection() {
                Some(selection) => self.delete(selection),
                None if self.dot < len => self.delete(self.dot..self.dot + 1),
                None => {}
            },
            ConsoleKey::Left => {
                if is_extending {
                    self.move_caret(self.dot.saturating_sub(1));
                } else if let Some(selection) = self.selection() {
                    self.set_caret(selection.start);
                } else {
                    self.set_caret(self.dot.saturating_sub(1));
                }
            }
            ConsoleKey::Right => {
                if is_extending {
                    self.move_caret(self.dot + 1);
                } else if let Some(selection) = self.selection() {
                    self.set_caret(selection.end);
                } else {
                    self.set_caret(self.dot + 1);
                }
            }
            ConsoleKey::Home | ConsoleKey::PageUp => {
                if is_extending {
                    self.move_caret(0);
                } else {
                    self.set_caret(0);
                }
            }
            ConsoleKey::End | ConsoleKey::PageDown => {
                if is_extending {
                    self.move_caret(len);
                } else {
                    self.set_caret(len);
                }
            }
            _ => {}
        }
    }

    fn set_wait_feedback(&mut self, is_waiting: bool) { self.is_waiting = is_waiting; }
}
