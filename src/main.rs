use clap::Parser;
use gitprompt::{LOG_FILE, Res, cli::Args, config, error::Error};
use log::LevelFilter;
use std::{
    env,
    io::{self, Write},
    process::ExitCode,
};

fn main() -> ExitCode {
    let args = Args::parse();

    // Anything printed ends up in the prompt, so errors only go to the log
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Res<()> {
    if args.log {
        simple_logging::log_to_file(LOG_FILE, LevelFilter::Debug).map_err(Error::OpenLogFile)?;
    }

    log::debug!("Initializing config");
    let config = config::init_config(args)?;
    let dir = env::current_dir().map_err(Error::CurrentDir)?;

    let Some(prompt) = gitprompt::run(args, &config, &dir)? else {
        return Ok(());
    };

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(prompt.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(Error::WriteOutput)?;

    Ok(())
}
