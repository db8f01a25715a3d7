//! Coloured terminal output

use owo_colors::{OwoColorize, Style};

/// Detects whether colored output should be enabled
fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

fn paint(text: &str, style: Style) -> String {
    if supports_color() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Extension trait for colorizing output
pub trait Colorize: AsRef<str> {
    /// Color as success (green)
    fn success(&self) -> String {
        paint(self.as_ref(), Style::new().green())
    }

    /// Color as warning (yellow)
    fn warning(&self) -> String {
        paint(self.as_ref(), Style::new().yellow())
    }

    /// Dim the text
    fn dim(&self) -> String {
        paint(self.as_ref(), Style::new().dimmed())
    }
}

impl<T: AsRef<str> + ?Sized> Colorize for T {}
