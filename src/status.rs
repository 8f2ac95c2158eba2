use crate::{
    error::{Error, ParseError},
    git::{
        branch::Branch,
        commit::Commit,
        file_status::{FileStatus, StatusCode},
    },
};

const HEADER_MARKER: &str = "##";

/// Everything the prompt shows about a work tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Status {
    pub branch: String,
    /// Set when only the branch was looked up. The counts are all zero then.
    pub branch_only: bool,

    pub ahead: u32,
    pub behind: u32,
    pub staged: u32,
    pub conflicts: u32,
    pub changed: u32,
    pub untracked: u32,
}

impl Status {
    pub fn branch_only(branch: String) -> Self {
        Status {
            branch,
            branch_only: true,
            ..Default::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.staged == 0 && self.conflicts == 0 && self.changed == 0 && self.untracked == 0
    }

    /// Folds the output of `git status --porcelain --branch` into a `Status`.
    ///
    /// `describe_head` is only called for a detached HEAD and must return the
    /// output of `git log -1 --format=%h%d`.
    pub fn from_lines<I, F>(lines: I, describe_head: F) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Result<String, Error>>,
        F: FnMut() -> Result<String, Error>,
    {
        let mut builder = StatusBuilder::new(describe_head);
        for line in lines {
            builder.feed(&line?)?;
        }

        Ok(builder.finish())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    AwaitingHeader,
    Accumulating,
}

pub struct StatusBuilder<F> {
    status: Status,
    stage: Stage,
    describe_head: F,
}

impl<F> StatusBuilder<F>
where
    F: FnMut() -> Result<String, Error>,
{
    pub fn new(describe_head: F) -> Self {
        Self {
            status: Status::default(),
            stage: Stage::AwaitingHeader,
            describe_head,
        }
    }

    pub fn feed(&mut self, line: &str) -> Result<(), Error> {
        let stage = std::mem::replace(&mut self.stage, Stage::Accumulating);

        if line.starts_with(HEADER_MARKER) {
            if stage != Stage::AwaitingHeader {
                return Err(malformed(
                    line,
                    ParseError::new(line, 0, "a file status line"),
                ));
            }

            return self.feed_header(line);
        }

        let file = FileStatus::parse(line).map_err(|cause| malformed(line, cause))?;
        self.count(file);
        Ok(())
    }

    pub fn finish(self) -> Status {
        self.status
    }

    fn feed_header(&mut self, line: &str) -> Result<(), Error> {
        let branch = Branch::parse(line).map_err(|cause| malformed(line, cause))?;

        if !branch.name.is_empty() {
            self.status.branch = branch.name;
            self.status.ahead = branch.ahead;
            self.status.behind = branch.behind;
            return Ok(());
        }

        let description = (self.describe_head)()?;
        let description = description.trim();
        let commit = Commit::parse(description).map_err(|cause| malformed(description, cause))?;
        self.status.branch = commit.identity();
        Ok(())
    }

    fn count(&mut self, file: FileStatus) {
        if file.is_untracked() {
            self.status.untracked += 1;
            return;
        }

        match file.index {
            StatusCode::UpdatedButUnmerged => self.status.conflicts += 1,
            StatusCode::Unmodified => (),
            _ => self.status.staged += 1,
        }

        if file.work_tree == StatusCode::Modified {
            self.status.changed += 1;
        }
    }
}

fn malformed(line: &str, cause: ParseError) -> Error {
    Error::MalformedInput {
        line: line.to_string(),
        cause,
    }
}
