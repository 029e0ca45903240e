// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ConsoleState, EmbeddedImage, StyleApplication, TextStyle, TextSurface,
            report_location_error};

/// Something that can be appended to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintItem {
    Text(String),
    Image(EmbeddedImage),
}

impl From<String> for PrintItem {
    fn from(it: String) -> Self { PrintItem::Text(it) }
}

impl From<&str> for PrintItem {
    fn from(it: &str) -> Self { PrintItem::Text(it.to_string()) }
}

impl From<EmbeddedImage> for PrintItem {
    fn from(it: EmbeddedImage) -> Self { PrintItem::Image(it) }
}

impl<S: TextSurface> ConsoleState<S> {
    /// Append at the end of the document with the current input style, then commit
    /// everything. Whatever the user had typed in the tail becomes committed too.
    pub fn append_output(&mut self, item: &PrintItem) {
        let end = self.surface.len();
        let result = match item {
            PrintItem::Text(text) => self.surface.replace_range(end..end, text),
            PrintItem::Image(image) => self.surface.insert_image(end, image),
        };
        if let Err(error) = result {
            report_location_error(&error);
        }
        self.commit_to_end();
    }

    /// Snapshot the input style, merge `style` into it, append, then restore the
    /// snapshot. Callers run this inside a single critical section.
    pub fn append_styled_output(&mut self, item: &PrintItem, style: &TextStyle) {
        let saved_style = self.surface.character_style();
        self.surface
            .set_character_style(style, StyleApplication::Merge);
        self.append_output(item);
        self.surface
            .set_character_style(&saved_style, StyleApplication::Replace);
    }

    pub fn append_error_output(&mut self, text: &str) {
        let style = TextStyle::new().color(self.config.error_color);
        self.append_styled_output(&PrintItem::Text(text.to_string()), &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasicColor, ConsoleConfig, MemorySurface, RunContent};
    use pretty_assertions::assert_eq;

    fn new_state() -> ConsoleState<MemorySurface> {
        ConsoleState::new(MemorySurface::new(), None, ConsoleConfig::default())
    }

    #[test]
    fn test_output_commits_typed_tail() {
        let mut state = new_state();
        state.paste_text("typed");

        state.append_output(&"out".into());

        assert_eq!(state.document_text(), "typedout");
        assert_eq!(state.commit_boundary.offset(), 8);
        assert_eq!(state.surface.caret(), 8);
        assert_eq!(state.tail_text(), "");
    }

    #[test]
    fn test_styled_output_restores_style() {
        let mut state = new_state();
        let before = state.surface.character_style();

        state.append_styled_output(
            &"warn".into(),
            &TextStyle::new().color(BasicColor::Yellow).bold(true),
        );
        state.append_output(&"plain".into());

        assert_eq!(state.surface.character_style(), before);
        let runs = state.surface.styled_runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].content, RunContent::Text("warn".into()));
        assert_eq!(runs[0].style.bold, Some(true));
        // Merged over the default font.
        assert_eq!(runs[0].style.font_size, Some(14));
        assert_eq!(runs[1].style, before);
    }

    #[test]
    fn test_image_output_occupies_one_offset() {
        let mut state = new_state();
        let image = EmbeddedImage::new("logo", 2, 2, vec![0_u8; 16]);

        state.append_output(&image.clone().into());
        state.append_output(&"\n".into());

        assert_eq!(state.surface.len(), 2);
        assert_eq!(state.surface.image_at(0), Some(&image));
        assert_eq!(state.commit_boundary.offset(), 2);
    }
}
