//! Terminal colors for each rendering role

use crossterm::style::{style, Color, Stylize};

/// Semantic role of a colored span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Section headers (`* Definition`)
    Header,
    /// Translated text and definitions
    Translation,
    /// The queried word inside a sample sentence
    Highlight,
}

impl Role {
    /// Terminal color used for this role
    pub fn color(self) -> Color {
        match self {
            Role::Header => Color::Cyan,
            Role::Translation => Color::Magenta,
            Role::Highlight => Color::Yellow,
        }
    }
}

/// Wraps text in role colors, or passes it through when disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// A palette that emits ANSI color codes
    pub fn colored() -> Self {
        Self { enabled: true }
    }

    /// A palette that leaves text untouched
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Wraps `text` in the color for `role`, resetting afterwards
    pub fn paint(&self, role: Role, text: &str) -> String {
        if self.enabled {
            style(text).with(role.color()).to_string()
        } else {
            text.to_string()
        }
    }
}
