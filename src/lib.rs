pub mod cli;
pub mod config;
pub mod error;
pub mod git;
mod process;
pub mod prompt;
pub mod status;

use config::Config;
use error::Error;
use process::Deadline;
use prompt::Prompt;
use std::{error::Error as StdError, path::Path};

const APP_NAME: &str = "gitprompt";
pub const LOG_FILE: &str = "gitprompt.log";

pub type Res<T> = Result<T, Box<dyn StdError>>;

/// Renders the prompt for the repository containing `dir`.
///
/// Returns `None` when `dir` isn't inside a git repository.
pub fn run(args: &cli::Args, config: &Config, dir: &Path) -> Result<Option<String>, Error> {
    let deadline = Deadline::after(config.timeout());

    let status = if config.no_git_status {
        log::debug!("Reading branch name");
        git::branch_name(dir, deadline)?
    } else {
        log::debug!("Reading status");
        git::status(dir, deadline)?
    };

    Ok(status.map(|status| {
        log::debug!("{:?}", status);
        Prompt {
            status: &status,
            shell: args.shell,
            style: &config.style,
        }
        .to_string()
    }))
}
