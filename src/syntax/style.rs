//! Style types for text rendering
//!
//! Colours and attributes attached to classified tokens, the line
//! number gutter and the status line.

/// Terminal colors
///
/// The named variants map onto the ANSI 16-color palette; `Rgb` is used
/// for the default truecolor palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a colour from a config value
    ///
    /// Accepts the lowercase palette names (`"bright-cyan"`, `"magenta"`)
    /// and `#rrggbb` hex triples.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some(hex) = name.strip_prefix('#') {
            return parse_hex(hex);
        }
        match name.to_lowercase().as_str() {
            "default" => Some(Color::Default),
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            "bright-black" | "gray" | "grey" => Some(Color::BrightBlack),
            "bright-red" => Some(Color::BrightRed),
            "bright-green" => Some(Color::BrightGreen),
            "bright-yellow" => Some(Color::BrightYellow),
            "bright-blue" => Some(Color::BrightBlue),
            "bright-magenta" => Some(Color::BrightMagenta),
            "bright-cyan" => Some(Color::BrightCyan),
            "bright-white" => Some(Color::BrightWhite),
            _ => None,
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Background of the code view
pub const BACKGROUND: Color = Color::Rgb(26, 27, 38);

/// Line number gutter
pub const LINE_NUMBER: Color = Color::Rgb(58, 65, 95);

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Create a reverse video style (for the status line)
    pub fn reverse() -> Self {
        Self {
            reverse: true,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert_eq!(style.bg, Color::Default);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style {
            bold: true,
            ..Style::fg(Color::Red).with_bg(Color::Blue)
        };
        assert_eq!(style.fg, Color::Red);
        assert_eq!(style.bg, Color::Blue);
        assert!(style.bold);
        assert!(!style.is_default());
    }

    #[test]
    fn test_color_from_name() {
        assert_eq!(Color::from_name("magenta"), Some(Color::Magenta));
        assert_eq!(Color::from_name("Bright-Cyan"), Some(Color::BrightCyan));
        assert_eq!(Color::from_name("#a2dc50"), Some(Color::Rgb(162, 220, 80)));
        assert_eq!(Color::from_name("#A2DC50"), Some(Color::Rgb(162, 220, 80)));
    }

    #[test]
    fn test_color_from_name_invalid() {
        assert_eq!(Color::from_name("mauve"), None);
        assert_eq!(Color::from_name("#12345"), None);
        assert_eq!(Color::from_name("#zzzzzz"), None);
        assert_eq!(Color::from_name("#+1+2+3"), None);
        assert_eq!(Color::from_name("#-1a2b3"), None);
        assert_eq!(Color::from_name(""), None);
    }
}
