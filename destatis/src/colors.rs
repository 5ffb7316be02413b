//! Terminal styling that respects `NO_COLOR` and TTY detection

use std::env;
use std::io::{stderr, stdout};

use colored::{ColoredString, Colorize};
use is_terminal::IsTerminal;

/// When to color terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Color only when writing to a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(format!(
                "Invalid color mode: '{}'. Valid options: auto, always, never",
                s
            )),
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        })
    }
}

/// Semantic styles used by the command line interface
///
/// Each method falls back to plain text when colors are disabled, so the
/// output can be piped into files without escape sequences.
#[derive(Debug, Clone)]
pub struct ColorHelper {
    mode: ColorMode,
    stdout_is_terminal: bool,
    stderr_is_terminal: bool,
    no_color: bool,
}

impl ColorHelper {
    pub fn new(mode: ColorMode) -> Self {
        Self::with_terminals(
            mode,
            stdout().is_terminal(),
            stderr().is_terminal(),
            env::var("NO_COLOR").is_ok_and(|value| !value.is_empty()),
        )
    }

    fn with_terminals(
        mode: ColorMode,
        stdout_is_terminal: bool,
        stderr_is_terminal: bool,
        no_color: bool,
    ) -> Self {
        Self {
            mode,
            stdout_is_terminal,
            stderr_is_terminal,
            no_color,
        }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn should_color_stdout(&self) -> bool {
        self.should_use_colors(self.stdout_is_terminal)
    }

    pub fn should_color_stderr(&self) -> bool {
        self.should_use_colors(self.stderr_is_terminal)
    }

    fn should_use_colors(&self, is_terminal: bool) -> bool {
        if self.no_color {
            return false;
        }
        match self.mode {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => is_terminal,
        }
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> ColoredString {
        if self.should_color_stdout() {
            style(text)
        } else {
            text.normal()
        }
    }

    /// Section titles and prompts
    pub fn heading(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.bold().blue())
    }

    /// Object codes such as `12411-0001`
    pub fn code(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.cyan())
    }

    pub fn success(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.green())
    }

    pub fn error(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.red())
    }

    pub fn warning(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.yellow())
    }

    /// Secondary information like time spans and update stamps
    pub fn muted(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.dimmed())
    }

    pub fn emphasis(&self, text: &str) -> ColoredString {
        self.paint(text, |t| t.bold())
    }
}

impl Default for ColorHelper {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_mode_parsing() {
        assert_eq!("auto".parse::<ColorMode>().unwrap(), ColorMode::Auto);
        assert_eq!("Always".parse::<ColorMode>().unwrap(), ColorMode::Always);
        assert_eq!(" never ".parse::<ColorMode>().unwrap(), ColorMode::Never);
        assert!("sometimes".parse::<ColorMode>().is_err());
        assert_eq!(ColorMode::Never.to_string(), "never");
    }

    #[test]
    fn mode_decides_with_terminal() {
        let auto_tty = ColorHelper::with_terminals(ColorMode::Auto, true, false, false);
        assert!(auto_tty.should_color_stdout());
        assert!(!auto_tty.should_color_stderr());

        let always = ColorHelper::with_terminals(ColorMode::Always, false, false, false);
        assert!(always.should_color_stdout());

        let never = ColorHelper::with_terminals(ColorMode::Never, true, true, false);
        assert!(!never.should_color_stdout());
    }

    #[test]
    fn no_color_wins() {
        let helper = ColorHelper::with_terminals(ColorMode::Always, true, true, true);
        assert!(!helper.should_color_stdout());
        assert!(!helper.should_color_stderr());
        assert_eq!(helper.heading("Tables").to_string(), "Tables");
        assert_eq!(helper.code("12411-0001").to_string(), "12411-0001");
    }
}
