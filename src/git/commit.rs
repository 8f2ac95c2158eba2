use crate::error::ParseError;

const HEAD_POINTER: &str = "HEAD -> ";
const TAG: &str = "tag: ";

/// A commit as printed by `git log -1 --format=%h%d`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Commit {
    pub short_id: String,
    /// The branch HEAD points at, empty if none.
    pub branch: String,
    pub tags: Vec<String>,
}

impl Commit {
    /// Parses `abcdef1` or `abcdef1 (HEAD -> master, origin/master, tag: v1)`.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let Some((short_id, refs)) = line.split_once(' ') else {
            if line.is_empty() {
                return Err(ParseError::new(line, 0, "a commit hash"));
            }

            return Ok(Commit {
                short_id: line.to_string(),
                ..Default::default()
            });
        };

        if short_id.is_empty() {
            return Err(ParseError::new(line, 0, "a commit hash"));
        }

        let refs_start = short_id.len() + 1;
        let Some(refs) = refs.strip_prefix('(') else {
            return Err(ParseError::new(line, refs_start, "'('"));
        };
        let Some(refs) = refs.strip_suffix(')') else {
            return Err(ParseError::new(line, line.len(), "')'"));
        };

        let mut commit = Commit {
            short_id: short_id.to_string(),
            ..Default::default()
        };

        for reference in refs.split(", ") {
            if let Some(branch) = reference.strip_prefix(HEAD_POINTER) {
                commit.branch = branch.to_string();
            } else if let Some(tag) = reference.strip_prefix(TAG) {
                commit.tags.push(tag.to_string());
            }
        }

        Ok(commit)
    }

    /// Name to show for a detached HEAD: the branch pointer, then the first
    /// tag, then the short hash.
    pub fn identity(&self) -> String {
        if !self.branch.is_empty() {
            self.branch.clone()
        } else if let Some(tag) = self.tags.first() {
            format!("tags/{}", tag)
        } else {
            format!(":{}", self.short_id)
        }
    }
}
