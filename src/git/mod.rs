use crate::{
    error::Error,
    process::{self, Deadline},
    status::Status,
};
use std::{path::Path, process::Command};

pub mod branch;
pub mod commit;
pub mod file_status;

fn git(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir);
    cmd
}

/// Runs `git status --porcelain --branch` in `dir`.
///
/// Returns `None` when `dir` isn't inside a git repository.
pub(crate) fn status(dir: &Path, deadline: Deadline) -> Result<Option<Status>, Error> {
    let mut lines = process::spawn_lines(
        git(dir, &["status", "--porcelain", "--branch"]),
        deadline,
    )?;

    let status = Status::from_lines(lines.by_ref(), || describe_head(dir, deadline))?;

    if !lines.wait()?.success() {
        log::debug!("{:?} is not a git repository", dir);
        return Ok(None);
    }

    Ok(Some(status))
}

/// Looks up only the branch name, or `:<short hash>` for a detached HEAD.
pub(crate) fn branch_name(dir: &Path, deadline: Deadline) -> Result<Option<Status>, Error> {
    let Some(name) = first_line(dir, &["rev-parse", "--abbrev-ref", "HEAD"], deadline)? else {
        // Unborn branch, or not a repository at all
        let unborn = first_line(dir, &["symbolic-ref", "--short", "HEAD"], deadline)?;
        return Ok(unborn.map(Status::branch_only));
    };

    if name != "HEAD" {
        return Ok(Some(Status::branch_only(name)));
    }

    let Some(hash) = first_line(dir, &["rev-parse", "--short", "HEAD"], deadline)? else {
        return Ok(None);
    };

    Ok(Some(Status::branch_only(format!(":{}", hash))))
}

fn describe_head(dir: &Path, deadline: Deadline) -> Result<String, Error> {
    let lines = process::spawn_lines(git(dir, &["log", "-1", "--format=%h%d"]), deadline)?
        .read_to_end()?;

    Ok(lines.into_iter().next().unwrap_or_default())
}

fn first_line(dir: &Path, args: &[&str], deadline: Deadline) -> Result<Option<String>, Error> {
    let mut lines = process::spawn_lines(git(dir, args), deadline)?;
    let first = lines.next().transpose()?;

    // Drain so the exit status reflects the whole run
    for line in lines.by_ref() {
        line?;
    }

    if !lines.wait()?.success() {
        return Ok(None);
    }

    Ok(Some(first.unwrap_or_default().trim().to_string()))
}
