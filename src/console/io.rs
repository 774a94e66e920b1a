//! Command input and output handles
//!
//! Every command receives the same input and output handles, so output
//! written by a nested command lands in the same place as its caller's.

use clap::ArgMatches;
use colored::{ColoredString, Colorize};

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

/// Styles a line of output can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Info,
    Comment,
    Error,
    /// Bold red on yellow
    Fire,
    /// Bold cyan on white
    Ice,
    /// A file name
    File,
    /// A setting name
    Setting,
    /// A file name in an error message
    FileError,
    /// A setting name in an error message
    SettingError,
}

impl Style {
    /// Error styles go to stderr and are still written when quiet
    pub fn is_error(self) -> bool {
        matches!(self, Style::Error | Style::FileError | Style::SettingError)
    }

    /// Apply the terminal colors of this style
    pub fn paint(self, line: &str) -> ColoredString {
        match self {
            Style::Plain => line.normal(),
            Style::Info | Style::File => line.green(),
            Style::Comment => line.yellow(),
            Style::Error => line.white().on_red(),
            Style::Fire => line.red().on_yellow().bold(),
            Style::Ice => line.cyan().on_white().bold(),
            Style::Setting => line.white().bold(),
            Style::FileError => line.green().on_red(),
            Style::SettingError => line.white().on_red().bold(),
        }
    }
}

/// Parsed arguments of the running command
#[derive(Debug, Clone, Default)]
pub struct Input {
    args: Vec<String>,
    matches: ArgMatches,
}

impl Input {
    pub fn new(args: Vec<String>, matches: ArgMatches) -> Self {
        Input { args, matches }
    }

    /// Raw arguments, starting with the command name
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }

    /// Value of a string argument or option
    pub fn get_one(&self, id: &str) -> Option<&String> {
        self.matches.try_get_one::<String>(id).ok().flatten()
    }

    /// Value of a boolean flag, `false` when the command has no such flag
    pub fn get_flag(&self, id: &str) -> bool {
        self.matches
            .try_get_one::<bool>(id)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false)
    }
}

/// Line-oriented output sink
pub trait Output {
    /// Write one line in a style
    fn write_styled(&mut self, line: &str, style: Style);

    /// Current verbosity
    fn verbosity(&self) -> Verbosity {
        Verbosity::Normal
    }

    /// Change the verbosity
    fn set_verbosity(&mut self, _verbosity: Verbosity) {}

    /// Write one plain line
    fn writeln(&mut self, line: &str) {
        self.write_styled(line, Style::Plain);
    }

    /// Write a padded block of lines
    fn block(&mut self, lines: &[String], style: Style) {
        for line in format_block(lines, true) {
            self.write_styled(&line, style);
        }
    }
}

/// Pad a group of lines to the same width
///
/// Large blocks get two spaces of padding and an empty line above and below,
/// so the style background forms a box.
pub fn format_block(lines: &[String], large: bool) -> Vec<String> {
    let padding = if large { 2 } else { 1 };
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + padding * 2;

    let mut block = Vec::with_capacity(lines.len() + 2);
    if large {
        block.push(" ".repeat(width));
    }
    for line in lines {
        let fill = width - padding - line.chars().count();
        block.push(format!("{}{}{}", " ".repeat(padding), line, " ".repeat(fill)));
    }
    if large {
        block.push(" ".repeat(width));
    }
    block
}

/// Output to the terminal
///
/// Errors go to stderr and survive `Quiet`; everything else goes to stdout.
pub struct ConsoleOutput {
    verbosity: Verbosity,
}

impl ConsoleOutput {
    pub fn new() -> Self {
        ConsoleOutput {
            verbosity: Verbosity::Normal,
        }
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for ConsoleOutput {
    fn write_styled(&mut self, line: &str, style: Style) {
        if style.is_error() {
            if self.verbosity >= Verbosity::Quiet {
                eprintln!("{}", style.paint(line));
            }
        } else if self.verbosity >= Verbosity::Normal {
            println!("{}", style.paint(line));
        }
    }

    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }
}

/// Output kept in memory
///
/// Styles are dropped; the text is available through [`BufferedOutput::display`].
#[derive(Debug, Clone)]
pub struct BufferedOutput {
    lines: Vec<String>,
    verbosity: Verbosity,
}

impl BufferedOutput {
    pub fn new() -> Self {
        BufferedOutput {
            lines: Vec::new(),
            verbosity: Verbosity::Normal,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Everything written so far, one line per row
    pub fn display(&self) -> String {
        self.lines.join("\n")
    }
}

impl Default for BufferedOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for BufferedOutput {
    fn write_styled(&mut self, line: &str, style: Style) {
        let minimum = if style.is_error() {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        };
        if self.verbosity >= minimum {
            self.lines.push(line.to_string());
        }
    }

    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }
}
