use crate::{
    config::{StyleConfig, StyleConfigEntry},
    status::Status,
};
use clap::ValueEnum;
use crossterm::{
    Command,
    style::{Attribute, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use ratatui::style::{Modifier, Style};
use std::fmt::{self, Display, Write};

const CHECK: char = '✔';
const CROSS: char = '✖';
const DOT: char = '●';
const DOTS: char = '…';
const DOWN: char = '↓';
const PAR_CLOSE: char = ')';
const PAR_OPEN: char = '(';
const PIPE: char = '|';
const PLUS: char = '✚';
const UP: char = '↑';

const ATTRIBUTES: [(Modifier, Attribute); 5] = [
    (Modifier::BOLD, Attribute::Bold),
    (Modifier::DIM, Attribute::Dim),
    (Modifier::ITALIC, Attribute::Italic),
    (Modifier::UNDERLINED, Attribute::Underlined),
    (Modifier::REVERSED, Attribute::Reverse),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    #[default]
    Bash,
    Zsh,
}

impl Shell {
    /// Markers telling the shell that the enclosed bytes take up no columns.
    fn zero_width(self) -> (&'static str, &'static str) {
        match self {
            Shell::Bash => ("\x01", "\x02"),
            Shell::Zsh => ("%{", "%}"),
        }
    }
}

/// A rendered prompt fragment such as `(main↓1↑2|●1✚3…2)`.
pub struct Prompt<'a> {
    pub status: &'a Status,
    pub shell: Shell,
    pub style: &'a StyleConfig,
}

impl Display for Prompt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status;

        f.write_char(PAR_OPEN)?;
        self.styled(f, &self.style.branch, &status.branch)?;

        if !status.branch_only {
            if status.behind > 0 {
                write!(f, "{}{}", DOWN, status.behind)?;
            }

            if status.ahead > 0 {
                write!(f, "{}{}", UP, status.ahead)?;
            }

            f.write_char(PIPE)?;

            if status.staged > 0 {
                self.styled(f, &self.style.staged, format_args!("{}{}", DOT, status.staged))?;
            }

            if status.conflicts > 0 {
                self.styled(
                    f,
                    &self.style.conflict,
                    format_args!("{}{}", CROSS, status.conflicts),
                )?;
            }

            if status.changed > 0 {
                self.styled(f, &self.style.changed, format_args!("{}{}", PLUS, status.changed))?;
            }

            if status.untracked > 0 {
                write!(f, "{}{}", DOTS, status.untracked)?;
            }

            if status.is_clean() {
                self.styled(f, &self.style.clean, CHECK)?;
            }
        }

        f.write_char(PAR_CLOSE)
    }
}

impl Prompt<'_> {
    fn styled(
        &self,
        f: &mut fmt::Formatter<'_>,
        entry: &StyleConfigEntry,
        text: impl Display,
    ) -> fmt::Result {
        let style = Style::from(entry);
        if style == Style::default() {
            return write!(f, "{}", text);
        }

        let (open, close) = self.shell.zero_width();

        f.write_str(open)?;
        write_style(f, style)?;
        f.write_str(close)?;

        write!(f, "{}", text)?;

        f.write_str(open)?;
        SetAttribute(Attribute::Reset).write_ansi(f)?;
        f.write_str(close)
    }
}

fn write_style(f: &mut impl Write, style: Style) -> fmt::Result {
    if let Some(fg) = style.fg {
        SetForegroundColor(fg.into()).write_ansi(f)?;
    }

    if let Some(bg) = style.bg {
        SetBackgroundColor(bg.into()).write_ansi(f)?;
    }

    for (modifier, attribute) in ATTRIBUTES {
        if style.add_modifier.contains(modifier) {
            SetAttribute(attribute).write_ansi(f)?;
        }
    }

    Ok(())
}
