use crate::error::Error;
use itertools::Itertools;
use std::{
    borrow::Cow,
    io::{self, BufRead, BufReader},
    iter,
    process::{Child, Command, ExitStatus, Stdio},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

/// Shared time budget for every command of one prompt invocation.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Deadline(Option<Instant>);

impl Deadline {
    pub(crate) fn after(timeout: Option<Duration>) -> Self {
        Self(timeout.map(|timeout| Instant::now() + timeout))
    }

    fn remaining(&self) -> Option<Duration> {
        self.0
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

pub(crate) fn command_args(cmd: &Command) -> Cow<'static, str> {
    iter::once(cmd.get_program().to_string_lossy())
        .chain(cmd.get_args().map(|arg| arg.to_string_lossy()))
        .join(" ")
        .into()
}

/// Stdout of a running command, one line at a time.
///
/// Lines are read on a separate thread so waiting for the next one can be cut
/// short by the deadline. The child is killed if the stream is dropped early.
pub(crate) struct LineStream {
    args: Cow<'static, str>,
    child: Child,
    lines: Receiver<io::Result<String>>,
    deadline: Deadline,
    exit: Option<ExitStatus>,
}

pub(crate) fn spawn_lines(mut cmd: Command, deadline: Deadline) -> Result<LineStream, Error> {
    let args = command_args(&cmd);
    log::debug!("Running '{}'", args);

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(Error::SpawnCmd)?;

    let stdout = child.stdout.take().ok_or_else(|| {
        Error::SpawnCmd(io::Error::new(io::ErrorKind::BrokenPipe, "no stdout"))
    })?;

    let (sender, lines) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(stdout).lines() {
            if sender.send(line).is_err() {
                break;
            }
        }
    });

    Ok(LineStream {
        args,
        child,
        lines,
        deadline,
        exit: None,
    })
}

impl LineStream {
    pub(crate) fn next_line(&mut self) -> Result<Option<String>, Error> {
        let received = match self.deadline.remaining() {
            Some(remaining) => match self.lines.recv_timeout(remaining) {
                Ok(line) => Some(line),
                Err(RecvTimeoutError::Timeout) => {
                    log::debug!("'{}' timed out", self.args);
                    self.kill();
                    return Err(Error::Timeout);
                }
                Err(RecvTimeoutError::Disconnected) => None,
            },
            None => self.lines.recv().ok(),
        };

        received
            .transpose()
            .map_err(Error::CouldntReadCmdOutput)
    }

    /// Waits for the command to exit. Call once stdout is exhausted.
    pub(crate) fn wait(&mut self) -> Result<ExitStatus, Error> {
        if let Some(exit) = self.exit {
            return Ok(exit);
        }

        let exit = self.child.wait().map_err(Error::CouldntAwaitCmd)?;
        log::debug!("'{}' exited with {}", self.args, exit);
        self.exit = Some(exit);
        Ok(exit)
    }

    /// Reads all remaining output, failing if the command exits unsuccessfully.
    pub(crate) fn read_to_end(&mut self) -> Result<Vec<String>, Error> {
        let lines = self.by_ref().collect::<Result<Vec<_>, _>>()?;
        let exit = self.wait()?;

        if !exit.success() {
            return Err(Error::CmdBadExit(self.args.to_string(), exit.code()));
        }

        Ok(lines)
    }

    fn kill(&mut self) {
        if self.exit.is_some() {
            return;
        }

        if let Err(e) = self.child.kill() {
            log::warn!("Couldn't kill '{}': {}", self.args, e);
        }

        self.exit = self.child.wait().ok();
    }
}

impl Iterator for LineStream {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

impl Drop for LineStream {
    fn drop(&mut self) {
        self.kill();
    }
}
