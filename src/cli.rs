use crate::prompt::Shell;
use clap::Parser;

#[derive(Default, Debug, Parser)]
#[command(name = crate::APP_NAME, version)]
pub struct Args {
    /// Shell the prompt is rendered for
    #[clap(value_enum)]
    pub shell: Shell,
    /// Time budget for all git commands in milliseconds, 0 for unlimited
    #[clap(long, value_name = "MILLIS")]
    pub timeout: Option<u64>,
    /// Show only the branch, tag or hash without running 'git status'
    #[clap(long, action)]
    pub no_git_status: bool,
    /// Enable logging to 'gitprompt.log'
    #[clap(long, action)]
    pub log: bool,
}
