//! Terminal styling and color utilities.
//!
//! ANSI escape codes plus capability detection, so report rendering can stay
//! agnostic of whether it writes to a color terminal, a dumb terminal or a pipe.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for table headers.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for separators and the footer.
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for the banner border.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for rows that found a route.
    pub const GREEN: &str = "\x1b[32m";
    /// Orange (256-color) for banner text and rows without a route.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Red for rows that faulted.
    pub const RED: &str = "\x1b[31m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub header: &'static str,
    pub muted: &'static str,
    pub found: &'static str,
    pub missing: &'static str,
    pub fault: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            header: colors::WHITE_BOLD,
            muted: colors::GRAY,
            found: colors::GREEN,
            missing: colors::ORANGE,
            fault: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            header: "",
            muted: "",
            found: "",
            missing: "",
            fault: "",
        }
    }

    /// `colored()` if the terminal supports ANSI colors, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// This function respects:
/// - The `NO_COLOR` environment variable (https://no-color.org/)
/// - The `TERM=dumb` convention for non-capable terminals
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Check if the terminal supports Unicode characters.
///
/// Looks for UTF hints in `LANG` and `LC_ALL`.
#[must_use]
pub fn supports_unicode() -> bool {
    for key in ["LANG", "LC_ALL"] {
        if let Ok(value) = std::env::var(key) {
            if value.to_uppercase().contains("UTF") {
                return true;
            }
        }
    }
    #[cfg(windows)]
    {
        if let Ok(term) = std::env::var("TERM") {
            return !term.eq_ignore_ascii_case("dumb");
        }
        return true;
    }
    #[cfg(not(windows))]
    {
        false
    }
}

/// Format a number with thousand separators (commas).
///
/// # Examples
///
/// ```
/// # use routebench_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(1000), "1,000");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
