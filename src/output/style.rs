#![forbid(unsafe_code)]

//! Text styling with ANSI escape codes
//!
//! A [`Style`] is an immutable, ordered set of effects plus a colour switch
//! fixed at construction. With colour disabled `render` is the identity.

use std::io::{self, Write};
use termcolor::{Ansi, Color, ColorSpec, WriteColor};

/// A single text effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Bold,
    Dim,
    Italic,
    Underline,
    Red,
    Green,
    Yellow,
    Cyan,
}

/// An ordered set of effects applied when rendering text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    effects: Vec<Effect>,
    color_enabled: bool,
}

impl Style {
    /// A plain style; `color_enabled` decides whether escapes are ever emitted
    pub fn new(color_enabled: bool) -> Self {
        Style {
            effects: Vec::new(),
            color_enabled,
        }
    }

    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Returns a copy with `effect` appended
    pub fn with(&self, effect: Effect) -> Self {
        let mut effects = self.effects.clone();
        effects.push(effect);
        Style {
            effects,
            color_enabled: self.color_enabled,
        }
    }

    pub fn bold(&self) -> Self {
        self.with(Effect::Bold)
    }

    pub fn dim(&self) -> Self {
        self.with(Effect::Dim)
    }

    pub fn italic(&self) -> Self {
        self.with(Effect::Italic)
    }

    pub fn underline(&self) -> Self {
        self.with(Effect::Underline)
    }

    pub fn red(&self) -> Self {
        self.with(Effect::Red)
    }

    pub fn green(&self) -> Self {
        self.with(Effect::Green)
    }

    pub fn yellow(&self) -> Self {
        self.with(Effect::Yellow)
    }

    pub fn cyan(&self) -> Self {
        self.with(Effect::Cyan)
    }

    /// Wraps `text` in escape codes for this style
    pub fn render(&self, text: &str) -> String {
        if !self.color_enabled || self.effects.is_empty() {
            return text.to_string();
        }
        self.render_ansi(text).unwrap_or_else(|_| text.to_string())
    }

    fn render_ansi(&self, text: &str) -> io::Result<String> {
        let mut ansi = Ansi::new(Vec::new());
        ansi.set_color(&self.color_spec())?;
        ansi.write_all(text.as_bytes())?;
        ansi.reset()?;
        Ok(String::from_utf8_lossy(&ansi.into_inner()).into_owned())
    }

    fn color_spec(&self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_reset(false);
        for effect in &self.effects {
            match effect {
                Effect::Bold => spec.set_bold(true),
                Effect::Dim => spec.set_dimmed(true),
                Effect::Italic => spec.set_italic(true),
                Effect::Underline => spec.set_underline(true),
                Effect::Red => spec.set_fg(Some(Color::Red)),
                Effect::Green => spec.set_fg(Some(Color::Green)),
                Effect::Yellow => spec.set_fg(Some(Color::Yellow)),
                Effect::Cyan => spec.set_fg(Some(Color::Cyan)),
            };
        }
        spec
    }
}
