use std::{borrow::Cow, fmt, fmt::Display, io};

#[derive(Debug)]
pub enum Error {
    MalformedInput { line: String, cause: ParseError },
    Timeout,
    SpawnCmd(io::Error),
    CouldntReadCmdOutput(io::Error),
    CouldntAwaitCmd(io::Error),
    CmdBadExit(String, Option<i32>),
    Config(figment::Error),
    OpenLogFile(io::Error),
    WriteOutput(io::Error),
    CurrentDir(io::Error),
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedInput { line, cause } => {
                f.write_fmt(format_args!("Couldn't parse {:?}: {}", line, cause))
            }
            Error::Timeout => f.write_str("Timed out waiting for git"),
            Error::SpawnCmd(e) => f.write_fmt(format_args!("Failed to spawn command: {}", e)),
            Error::CouldntReadCmdOutput(e) => {
                f.write_fmt(format_args!("Couldn't read command output: {}", e))
            }
            Error::CouldntAwaitCmd(e) => f.write_fmt(format_args!("Couldn't await command: {}", e)),
            Error::CmdBadExit(args, code) => f.write_fmt(format_args!(
                "'{}' exited with code: {}",
                args,
                code.map(|c| c.to_string())
                    .unwrap_or_else(|| "".to_string())
            )),
            Error::Config(e) => f.write_fmt(format_args!("Configuration error: {}", e)),
            Error::OpenLogFile(e) => f.write_fmt(format_args!("Couldn't open log file: {}", e)),
            Error::WriteOutput(e) => f.write_fmt(format_args!("Couldn't write prompt: {}", e)),
            Error::CurrentDir(e) => {
                f.write_fmt(format_args!("Couldn't read current directory: {}", e))
            }
        }
    }
}

/// A line that doesn't match the grammar it was handed to.
///
/// `pos` is a byte offset into `input` pointing at the first character that
/// couldn't be consumed.
#[derive(Clone, PartialEq, Eq)]
pub struct ParseError {
    input: String,
    pos: usize,
    expected: Cow<'static, str>,
}

impl ParseError {
    pub(crate) fn new(input: &str, pos: usize, expected: impl Into<Cow<'static, str>>) -> Self {
        Self {
            input: input.to_string(),
            pos: pos.min(input.len()),
            expected: expected.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expected {:?}, {:?}<HERE>{:?}",
            self.expected,
            &self.input[..self.pos],
            &self.input[self.pos..]
        )
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {} at byte {}", self.expected, self.pos)
    }
}

impl std::error::Error for ParseError {}
