// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbValue {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbValue {
    #[must_use]
    pub const fn from_u8(red: u8, green: u8, blue: u8) -> Self { Self { red, green, blue } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicColor {
    Black,
    White,
    Gray,
    DarkGray,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsoleColor {
    Basic(BasicColor),
    Rgb(RgbValue),
}

impl From<BasicColor> for ConsoleColor {
    fn from(it: BasicColor) -> Self { ConsoleColor::Basic(it) }
}

impl From<RgbValue> for ConsoleColor {
    fn from(it: RgbValue) -> Self { ConsoleColor::Rgb(it) }
}

/// How [`TextSurface::set_character_style`] combines the given style with the current
/// input style.
///
/// [`TextSurface::set_character_style`]: crate::TextSurface::set_character_style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleApplication {
    /// Attributes that are set in the given style override the current ones; the rest
    /// are kept.
    Merge,
    /// The given style becomes the input style as is.
    Replace,
}

/// Character attributes. Every attribute is optional; `None` means "inherit whatever
/// the surface currently uses".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: Option<u16>,
    pub color: Option<ConsoleColor>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

impl TextStyle {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Style that sets font attributes only. Underline and color are left to whatever
    /// is current.
    #[must_use]
    pub fn from_font(
        arg_family: impl Into<String>,
        size: u16,
        bold: bool,
        italic: bool,
    ) -> Self {
        Self::new()
            .font_family(arg_family)
            .font_size(size)
            .bold(bold)
            .italic(italic)
    }

    #[must_use]
    pub fn font_family(mut self, arg_family: impl Into<String>) -> Self {
        self.font_family = Some(arg_family.into());
        self
    }

    #[must_use]
    pub fn font_size(mut self, size: u16) -> Self {
        self.font_size = Some(size);
        self
    }

    #[must_use]
    pub fn color(mut self, arg_color: impl Into<ConsoleColor>) -> Self {
        self.color = Some(arg_color.into());
        self
    }

    #[must_use]
    pub fn bold(mut self, it: bool) -> Self {
        self.bold = Some(it);
        self
    }

    #[must_use]
    pub fn italic(mut self, it: bool) -> Self {
        self.italic = Some(it);
        self
    }

    #[must_use]
    pub fn underline(mut self, it: bool) -> Self {
        self.underline = Some(it);
        self
    }

    /// Returns `self` with every attribute that is set in `other` taken from `other`.
    #[must_use]
    pub fn merged_with(&self, other: &TextStyle) -> TextStyle {
        TextStyle {
            font_family: other.font_family.clone().or_else(|| self.font_family.clone()),
            font_size: other.font_size.or(self.font_size),
            color: other.color.or(self.color),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            underline: other.underline.or(self.underline),
        }
    }

    #[must_use]
    pub fn is_plain(&self) -> bool { *self == Self::default() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_overrides_only_set_attributes() {
        let base = TextStyle::new()
            .font_family("Monospaced")
            .font_size(14)
            .underline(true);
        let overlay = TextStyle::from_font("Serif", 20, true, false);

        let merged = base.merged_with(&overlay);

        assert_eq!(merged.font_family.as_deref(), Some("Serif"));
        assert_eq!(merged.font_size, Some(20));
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.italic, Some(false));
        // Not part of a font, so it survives.
        assert_eq!(merged.underline, Some(true));
        assert_eq!(merged.color, None);
    }

    #[test]
    fn test_color_conversions() {
        let style = TextStyle::new().color(RgbValue::from_u8(1, 2, 3));
        assert_eq!(style.color, Some(ConsoleColor::Rgb(RgbValue::from_u8(1, 2, 3))));
        assert!(TextStyle::default().is_plain());
        assert!(!style.is_plain());
    }
}
