//! Message styling for CLI output.
//!
//! Provides consistent prefixes, colors, and formatting for all CLI messages.
//!
//! ## Message Types
//!
//! | Prefix | Meaning | Color |
//! |--------|---------|-------|
//! | `[ok]` | Success | Green |
//! | `[err]` | Error | Red |
//! | `[warn]` | Warning | Yellow |
//! | `[info]` | Information | Blue |
//! | `[hint]` | Suggestion | Cyan |

use owo_colors::OwoColorize;

use super::color::ColorMode;

/// Message severity/type for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Success - operation completed successfully
    Ok,
    /// Error - operation failed, cannot continue
    Err,
    /// Warning - operation succeeded with caveats
    Warn,
    /// Information - neutral status or progress update
    Info,
    /// Hint - actionable next step or tip
    Hint,
}

impl MessageType {
    /// Returns the prefix text for this message type.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Ok => "[ok]",
            Self::Err => "[err]",
            Self::Warn => "[warn]",
            Self::Info => "[info]",
            Self::Hint => "[hint]",
        }
    }
}

/// Main styling interface for CLI output.
///
/// # Example
///
/// ```
/// use trecbm25_cli::ui::{Style, MessageType, ColorMode};
///
/// let style = Style::new(ColorMode::Never);
/// println!("{}", style.message(MessageType::Ok, "Operation completed"));
/// ```
#[derive(Debug, Clone)]
pub struct Style {
    color_mode: ColorMode,
}

impl Default for Style {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Style {
    /// Create a Style instance by detecting environment settings.
    pub fn from_env() -> Self {
        Self {
            color_mode: ColorMode::detect(),
        }
    }

    /// Create a Style instance with an explicit color mode.
    pub fn new(color_mode: ColorMode) -> Self {
        Self { color_mode }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(&self) -> bool {
        self.color_mode.is_enabled()
    }

    /// Format a simple message with a type prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use trecbm25_cli::ui::{Style, MessageType, ColorMode};
    ///
    /// let style = Style::new(ColorMode::Never);
    /// assert_eq!(
    ///     style.message(MessageType::Ok, "Done"),
    ///     "[ok] Done"
    /// );
    /// ```
    pub fn message(&self, msg_type: MessageType, text: &str) -> String {
        let prefix = msg_type.prefix();
        if self.colors_enabled() {
            let colored_prefix = match msg_type {
                MessageType::Ok => prefix.green().to_string(),
                MessageType::Err => prefix.red().to_string(),
                MessageType::Warn => prefix.yellow().to_string(),
                MessageType::Info => prefix.blue().to_string(),
                MessageType::Hint => prefix.cyan().to_string(),
            };
            format!("{} {}", colored_prefix, text)
        } else {
            format!("{} {}", prefix, text)
        }
    }

    /// Format a detail line with 5-space indentation.
    pub fn message_detail(&self, label: &str, value: &str) -> String {
        format!("     {}: {}", label, value)
    }

    /// Format a section header.
    pub fn section(&self, title: &str) -> String {
        if self.colors_enabled() {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Format a structured error with an optional hint.
    ///
    /// # Example
    ///
    /// ```
    /// use trecbm25_cli::ui::{Style, ColorMode};
    ///
    /// let style = Style::new(ColorMode::Never);
    /// let output = style.error_with_hint(
    ///     "destination already exists",
    ///     Some("choose a directory that does not exist yet"),
    /// );
    /// assert!(output.contains("[err] destination already exists"));
    /// assert!(output.contains("Hint: choose a directory that does not exist yet"));
    /// ```
    pub fn error_with_hint(&self, msg: &str, hint: Option<&str>) -> String {
        let mut output = self.message(MessageType::Err, msg);
        if let Some(hint_text) = hint {
            output.push('\n');
            output.push_str(&format!("      Hint: {}", hint_text));
        }
        output
    }

    /// Format a key-value pair with optional coloring.
    ///
    /// # Example
    ///
    /// ```
    /// use trecbm25_cli::ui::{Style, ColorMode};
    ///
    /// let style = Style::new(ColorMode::Never);
    /// assert_eq!(style.key_value("docno", "LA010189-0001"), "docno: LA010189-0001");
    /// ```
    pub fn key_value(&self, key: &str, value: &str) -> String {
        if self.colors_enabled() {
            format!("{}: {}", key.dimmed(), value)
        } else {
            format!("{}: {}", key, value)
        }
    }

    /// Format a result's rank-and-score prefix (colored cyan for the rank).
    pub fn rank(&self, rank: usize) -> String {
        let text = format!("{:>2}.", rank);
        if self.colors_enabled() {
            text.cyan().to_string()
        } else {
            text
        }
    }
}
