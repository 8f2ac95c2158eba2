use gitprompt::{
    cli::Args,
    config::{Config, StyleConfig},
    error::Error,
    prompt::Shell,
};
use std::{fs, path::Path, process::Command};
use temp_dir::TempDir;

/// Keeps the developer's own git config out of every git run.
const GIT_ENV: [(&str, &str); 2] = [
    ("GIT_CONFIG_GLOBAL", "/dev/null"),
    ("GIT_CONFIG_SYSTEM", "/dev/null"),
];

pub struct TestContext {
    pub dir: TempDir,
    pub remote_dir: TempDir,
}

impl TestContext {
    pub fn setup_init() -> Self {
        let remote_dir = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();

        run(dir.path(), &["git", "init", "--initial-branch=main"]);
        set_config(dir.path());

        Self { dir, remote_dir }
    }

    pub fn setup_clone() -> Self {
        let remote_dir = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();

        run(
            remote_dir.path(),
            &["git", "init", "--bare", "--initial-branch=main"],
        );

        clone_and_commit(&remote_dir, "initial-file", "hello");
        run(
            dir.path(),
            &["git", "clone", remote_dir.path().to_str().unwrap(), "."],
        );
        set_config(dir.path());

        Self { dir, remote_dir }
    }

    pub fn prompt(&self) -> Result<Option<String>, Error> {
        self.prompt_with(Config {
            no_git_status: false,
            timeout_ms: 0,
            style: StyleConfig::plain(),
        })
    }

    pub fn branch_only_prompt(&self) -> Result<Option<String>, Error> {
        self.prompt_with(Config {
            no_git_status: true,
            timeout_ms: 0,
            style: StyleConfig::plain(),
        })
    }

    fn prompt_with(&self, config: Config) -> Result<Option<String>, Error> {
        let args = Args {
            shell: Shell::Bash,
            ..Default::default()
        };

        temp_env::with_vars(GIT_ENV.map(|(key, value)| (key, Some(value))), || {
            gitprompt::run(&args, &config, self.dir.path())
        })
    }
}

pub fn clone_and_commit(remote_dir: &TempDir, file_name: &str, file_content: &str) {
    let other_dir = TempDir::new().unwrap();

    run(
        other_dir.path(),
        &["git", "clone", remote_dir.path().to_str().unwrap(), "."],
    );

    set_config(other_dir.path());

    commit(other_dir.path(), file_name, file_content);
    run(other_dir.path(), &["git", "push", "origin", "HEAD:main"]);
}

fn set_config(path: &Path) {
    run(path, &["git", "config", "user.email", "ci@example.com"]);
    run(path, &["git", "config", "user.name", "CI"]);
}

pub fn commit(dir: &Path, file_name: &str, contents: &str) {
    let path = dir.to_path_buf().join(file_name);
    let message = match path.try_exists() {
        Ok(true) => format!("modify {}", file_name),
        _ => format!("add {}", file_name),
    };
    fs::write(path, contents).expect("error writing to file");
    run(dir, &["git", "add", file_name]);
    run(dir, &["git", "commit", "-m", &message]);
}

pub fn run(dir: &Path, cmd: &[&str]) {
    assert!(try_run(dir, cmd), "{:?} failed", cmd);
}

/// Runs `cmd`, returning whether it exited successfully.
pub fn try_run(dir: &Path, cmd: &[&str]) -> bool {
    Command::new(cmd[0])
        .args(&cmd[1..])
        .current_dir(dir)
        .envs(GIT_ENV)
        .env("GIT_COMMITTER_DATE", "Sun Feb 18 14:00 2024 +0100")
        .output()
        .unwrap_or_else(|_| panic!("failed to execute {:?}", cmd))
        .status
        .success()
}

/// Like [`run`], returning trimmed stdout.
pub fn output(dir: &Path, cmd: &[&str]) -> String {
    let output = Command::new(cmd[0])
        .args(&cmd[1..])
        .current_dir(dir)
        .envs(GIT_ENV)
        .output()
        .unwrap_or_else(|_| panic!("failed to execute {:?}", cmd));

    String::from_utf8(output.stdout).unwrap().trim().to_string()
}
