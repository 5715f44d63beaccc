//! Neon-on-dark palette shared by rendering surfaces.

use crate::catalog::Accent;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    /// Near-black glass background (default)
    #[default]
    Midnight,
    /// Deep blue blueprint background
    Blueprint,
}

#[derive(Debug, Clone)]
pub struct ColorPalette {
    pub background: Color,
    pub panel: Color,
    pub foreground: Color,
    pub muted: Color,
    pub blue: Color,
    pub purple: Color,
    pub green: Color,
    pub red: Color,
}

/// UI element types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Text,
    Title,
    Border,
    /// Selected page elements
    Selected,
    /// Cursor over a page element
    Focus,
    Accent,
    Secondary,
    Inactive,
    Warning,
    /// Side panel surface
    Panel,
    Background,
}

#[derive(Debug, Clone)]
pub struct Theme {
    colors: ColorPalette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        let colors = match variant {
            ThemeVariant::Midnight => ColorPalette {
                background: Color::Rgb(5, 5, 5),       // #050505
                panel: Color::Rgb(8, 8, 8),            // #080808
                foreground: Color::Rgb(229, 231, 235), // gray-200
                muted: Color::Rgb(107, 114, 128),      // gray-500
                blue: Color::Rgb(51, 153, 255),        // #3399ff
                purple: Color::Rgb(168, 85, 247),      // #a855f7
                green: Color::Rgb(16, 185, 129),
                red: Color::Rgb(239, 68, 68),
            },
            ThemeVariant::Blueprint => ColorPalette {
                background: Color::Rgb(8, 20, 41),
                panel: Color::Rgb(12, 28, 56),
                foreground: Color::Rgb(219, 234, 254),
                muted: Color::Rgb(96, 125, 163),
                blue: Color::Rgb(125, 211, 252),
                purple: Color::Rgb(196, 181, 253),
                green: Color::Rgb(110, 231, 183),
                red: Color::Rgb(252, 165, 165),
            },
        };

        Self { colors }
    }

    pub fn accent_color(&self, accent: Accent) -> Color {
        match accent {
            Accent::Blue => self.colors.blue,
            Accent::Purple => self.colors.purple,
            Accent::Green => self.colors.green,
            Accent::Red => self.colors.red,
        }
    }

    pub fn ratatui_style(&self, element: Element) -> Style {
        let base = Style::default().bg(self.colors.background);
        match element {
            Element::Text | Element::Background => base.fg(self.colors.foreground),
            Element::Title => base.fg(self.colors.foreground).add_modifier(Modifier::BOLD),
            Element::Border | Element::Inactive => base.fg(self.colors.muted),
            Element::Selected => Style::default()
                .fg(self.colors.background)
                .bg(self.colors.blue)
                .add_modifier(Modifier::BOLD),
            Element::Focus => base.fg(self.colors.blue).add_modifier(Modifier::BOLD),
            Element::Accent => base.fg(self.colors.blue).add_modifier(Modifier::BOLD),
            Element::Secondary => base.fg(self.colors.purple),
            Element::Warning => base.fg(self.colors.red),
            Element::Panel => Style::default()
                .fg(self.colors.foreground)
                .bg(self.colors.panel),
        }
    }

    pub fn text_style(&self) -> Style {
        self.ratatui_style(Element::Text)
    }

    pub fn accent_style(&self) -> Style {
        self.ratatui_style(Element::Accent)
    }

    pub fn inactive_style(&self) -> Style {
        self.ratatui_style(Element::Inactive)
    }
}
