use crate::error::ParseError;

/// State of a file in the index or the work tree, as one column of
/// `git status --porcelain`.
///
/// For paths with merge conflicts the two columns describe each side of the
/// merge instead. Codes git may add later are kept as [`StatusCode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Untracked,
    Unmodified,
    Modified,
    Added,
    Deleted,
    Renamed,
    Copied,
    UpdatedButUnmerged,
    Ignored,
    Other(char),
}

impl StatusCode {
    pub fn as_char(self) -> char {
        match self {
            StatusCode::Untracked => '?',
            StatusCode::Unmodified => ' ',
            StatusCode::Modified => 'M',
            StatusCode::Added => 'A',
            StatusCode::Deleted => 'D',
            StatusCode::Renamed => 'R',
            StatusCode::Copied => 'C',
            StatusCode::UpdatedButUnmerged => 'U',
            StatusCode::Ignored => '!',
            StatusCode::Other(c) => c,
        }
    }
}

impl From<char> for StatusCode {
    fn from(c: char) -> Self {
        match c {
            '?' => StatusCode::Untracked,
            ' ' => StatusCode::Unmodified,
            'M' => StatusCode::Modified,
            'A' => StatusCode::Added,
            'D' => StatusCode::Deleted,
            'R' => StatusCode::Renamed,
            'C' => StatusCode::Copied,
            'U' => StatusCode::UpdatedButUnmerged,
            '!' => StatusCode::Ignored,
            other => StatusCode::Other(other),
        }
    }
}

/// The `XY` prefix of a single `git status --porcelain` file line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStatus {
    pub index: StatusCode,
    pub work_tree: StatusCode,
}

impl FileStatus {
    /// Reads the status code from the first two characters of `line`. The
    /// rest of the line (the path) is ignored.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut chars = line.chars();
        let (Some(x), Some(y)) = (chars.next(), chars.next()) else {
            return Err(ParseError::new(
                line,
                line.len(),
                "a two character status code",
            ));
        };

        Ok(FileStatus {
            index: x.into(),
            work_tree: y.into(),
        })
    }

    pub fn is_untracked(&self) -> bool {
        self.index == StatusCode::Untracked && self.work_tree == StatusCode::Untracked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn staged_modification() {
        let status = FileStatus::parse("M  src/main.rs").unwrap();
        assert_eq!(
            status,
            FileStatus {
                index: StatusCode::Modified,
                work_tree: StatusCode::Unmodified,
            }
        );
        assert!(!status.is_untracked());
    }

    #[test]
    fn prefix_only() {
        assert_eq!(
            FileStatus::parse("M ").unwrap(),
            FileStatus {
                index: StatusCode::Modified,
                work_tree: StatusCode::Unmodified,
            }
        );
    }

    #[test]
    fn untracked() {
        assert!(FileStatus::parse("?? spaghet").unwrap().is_untracked());
    }

    #[test]
    fn half_untracked_is_not_untracked() {
        assert!(!FileStatus::parse("?M foo").unwrap().is_untracked());
    }

    #[test]
    fn unknown_code_passes_through() {
        let status = FileStatus::parse(" T script.sh").unwrap();
        assert_eq!(status.work_tree, StatusCode::Other('T'));
        assert_eq!(status.work_tree.as_char(), 'T');
    }

    #[test]
    fn conflict() {
        assert_eq!(
            FileStatus::parse("UU both-modified").unwrap().index,
            StatusCode::UpdatedButUnmerged
        );
    }

    #[test]
    fn too_short() {
        let err = FileStatus::parse("M").unwrap_err();
        assert_eq!(err.pos(), 1);
        assert!(FileStatus::parse("").is_err());
    }

    #[test]
    fn code_round_trips_through_char() {
        for c in ['?', ' ', 'M', 'A', 'D', 'R', 'C', 'U', '!'] {
            assert_eq!(StatusCode::from(c).as_char(), c);
        }
    }
}
