use crate::error::ParseError;

const HEADER_PREFIX: &str = "## ";
const INITIAL_COMMIT: &str = "Initial commit on";
const NO_COMMITS_YET: &str = "No commits yet on";
const NO_BRANCH: &str = "no branch";
const TRACKING_SEPARATOR: &str = "...";
const CLAUSE_SEPARATOR: &str = ", ";
const AHEAD: &str = "ahead";
const BEHIND: &str = "behind";

/// Branch and tracking information from the header of
/// `git status --porcelain --branch`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Empty when HEAD is detached.
    pub name: String,
    /// Empty when the branch doesn't track anything.
    pub remote: String,
    pub ahead: u32,
    pub behind: u32,
}

impl Branch {
    /// Parses a header line. The leading `## ` is optional.
    ///
    /// Recognized forms:
    ///
    /// ```text
    /// ## master
    /// ## master...origin/master
    /// ## master...origin/master [ahead 3]
    /// ## master...origin/master [behind 4]
    /// ## master...origin/master [ahead 3, behind 4]
    /// ## HEAD (no branch)
    /// ## No commits yet on master
    /// ```
    pub fn parse(header: &str) -> Result<Self, ParseError> {
        let line = header.strip_prefix(HEADER_PREFIX).unwrap_or(header);

        if line.contains(INITIAL_COMMIT) || line.contains(NO_COMMITS_YET) {
            let Some(space) = line.rfind(' ') else {
                return Err(ParseError::new(line, line.len(), "a branch name"));
            };

            return Ok(Branch {
                name: branch_name(line, space + 1, &line[space + 1..])?,
                ..Default::default()
            });
        }

        if line.contains(NO_BRANCH) {
            return Ok(Branch::default());
        }

        let Some((name, tracking)) = line.split_once(TRACKING_SEPARATOR) else {
            return Ok(Branch {
                name: branch_name(line, 0, line)?,
                ..Default::default()
            });
        };

        let name = branch_name(line, 0, name)?;
        let Some((remote, divergence)) = tracking.split_once(' ') else {
            return Ok(Branch {
                name,
                remote: tracking.to_string(),
                ..Default::default()
            });
        };

        let mut branch = Branch {
            name,
            remote: remote.to_string(),
            ..Default::default()
        };

        let divergence_start = line.len() - divergence.len();
        let Some(clauses) = divergence.strip_prefix('[') else {
            return Err(ParseError::new(line, divergence_start, "'['"));
        };
        let Some(clauses) = clauses.strip_suffix(']') else {
            return Err(ParseError::new(line, line.len(), "']'"));
        };

        let mut clause_start = divergence_start + 1;
        for clause in clauses.splitn(2, CLAUSE_SEPARATOR) {
            if let Some(count) = clause.strip_prefix(AHEAD) {
                branch.ahead = parse_count(line, clause_start + AHEAD.len(), clause, count)?;
            } else if let Some(count) = clause.strip_prefix(BEHIND) {
                branch.behind = parse_count(line, clause_start + BEHIND.len(), clause, count)?;
            }

            clause_start += clause.len() + CLAUSE_SEPARATOR.len();
        }

        Ok(branch)
    }
}

fn branch_name(line: &str, pos: usize, name: &str) -> Result<String, ParseError> {
    if name.is_empty() {
        return Err(ParseError::new(line, pos, "a branch name"));
    }

    Ok(name.to_string())
}

/// `count` is the clause after its keyword, e.g. `" 3"` for `"ahead 3"`.
fn parse_count(line: &str, pos: usize, clause: &str, count: &str) -> Result<u32, ParseError> {
    let expected = || format!("a commit count in {:?}", clause);

    let Some(digits) = count.strip_prefix(' ') else {
        return Err(ParseError::new(line, pos, expected()));
    };

    digits
        .parse()
        .map_err(|_| ParseError::new(line, pos + 1, expected()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tracking(ahead: u32, behind: u32) -> Branch {
        Branch {
            name: "master".to_string(),
            remote: "origin/master".to_string(),
            ahead,
            behind,
        }
    }

    #[test]
    fn local_only() {
        assert_eq!(
            Branch::parse("## test.lol").unwrap(),
            Branch {
                name: "test.lol".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn up_to_date() {
        assert_eq!(
            Branch::parse("## master...origin/master").unwrap(),
            tracking(0, 0)
        );
    }

    #[test]
    fn ahead() {
        assert_eq!(
            Branch::parse("## master...origin/master [ahead 3]").unwrap(),
            tracking(3, 0)
        );
    }

    #[test]
    fn behind() {
        assert_eq!(
            Branch::parse("## master...origin/master [behind 4]").unwrap(),
            tracking(0, 4)
        );
    }

    #[test]
    fn diverged() {
        assert_eq!(
            Branch::parse("## master...origin/master [ahead 3, behind 4]").unwrap(),
            tracking(3, 4)
        );
    }

    #[test]
    fn without_header_prefix() {
        assert_eq!(
            Branch::parse("master...origin/master [ahead 3, behind 4]").unwrap(),
            tracking(3, 4)
        );
    }

    #[test]
    fn upstream_gone() {
        assert_eq!(
            Branch::parse("## master...origin/master [gone]").unwrap(),
            tracking(0, 0)
        );
    }

    #[test]
    fn no_commits_yet() {
        assert_eq!(
            Branch::parse("## No commits yet on main").unwrap(),
            Branch {
                name: "main".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn initial_commit() {
        assert_eq!(
            Branch::parse("## Initial commit on master").unwrap().name,
            "master"
        );
    }

    #[test]
    fn detached() {
        assert_eq!(
            Branch::parse("## HEAD (no branch)").unwrap(),
            Branch::default()
        );
    }

    #[test]
    fn missing_closing_bracket() {
        let err = Branch::parse("## master...origin/master [ahead 3").unwrap_err();
        assert_eq!(err.expected(), "']'");
    }

    #[test]
    fn missing_opening_bracket() {
        let err = Branch::parse("## master...origin/master ahead 3]").unwrap_err();
        assert_eq!(err.expected(), "'['");
        assert_eq!(&err.input()[err.pos()..], "ahead 3]");
    }

    #[test]
    fn bad_count() {
        let err = Branch::parse("## master...origin/master [ahead 1, behind lots]").unwrap_err();
        assert_eq!(err.expected(), "a commit count in \"behind lots\"");
        assert_eq!(&err.input()[err.pos()..], "lots]");
    }

    #[test]
    fn keyword_without_count() {
        let err = Branch::parse("## master...origin/master [ahead]").unwrap_err();
        assert_eq!(err.expected(), "a commit count in \"ahead\"");
        assert_eq!(&err.input()[err.pos()..], "]");

        let err = Branch::parse("## master...origin/master [ahead, behind 2]").unwrap_err();
        assert_eq!(err.expected(), "a commit count in \"ahead\"");
    }

    #[test]
    fn missing_branch_name() {
        let err = Branch::parse("## ...origin/master").unwrap_err();
        assert_eq!(err.expected(), "a branch name");
        assert_eq!(err.pos(), 0);

        assert_eq!(Branch::parse("## ").unwrap_err().expected(), "a branch name");
        assert!(Branch::parse("## ...origin/master [ahead 1]").is_err());
    }

    #[test]
    fn no_commits_yet_without_name() {
        let err = Branch::parse("## No commits yet on ").unwrap_err();
        assert_eq!(err.expected(), "a branch name");
        assert_eq!(err.pos(), err.input().len());
    }

    #[test]
    fn negative_count() {
        assert!(Branch::parse("## master...origin/master [ahead -1]").is_err());
    }
}
