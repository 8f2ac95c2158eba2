use crate::{APP_NAME, cli::Args, error::Error};
use etcetera::BaseStrategy;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
const ENV_PREFIX: &str = "GITPROMPT_";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default, deserialize_with = "figment::util::bool_from_str_or_int")]
    pub no_git_status: bool,
    #[serde(default)]
    pub timeout_ms: u64,
    pub style: StyleConfig,
}

#[derive(Debug, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub branch: StyleConfigEntry,
    #[serde(default)]
    pub staged: StyleConfigEntry,
    #[serde(default)]
    pub conflict: StyleConfigEntry,
    #[serde(default)]
    pub changed: StyleConfigEntry,
    #[serde(default)]
    pub clean: StyleConfigEntry,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    fn apply_args(&mut self, args: &Args) {
        if args.no_git_status {
            self.no_git_status = true;
        }

        if let Some(timeout_ms) = args.timeout {
            self.timeout_ms = timeout_ms;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Figment::from(Toml::string(DEFAULT_CONFIG))
            .extract()
            .expect("Failed to parse default_config.toml")
    }
}

impl StyleConfig {
    /// A style without any colors or modifiers, for output that must stay
    /// free of escape sequences.
    pub fn plain() -> Self {
        Self {
            branch: StyleConfigEntry::default(),
            staged: StyleConfigEntry::default(),
            conflict: StyleConfigEntry::default(),
            changed: StyleConfigEntry::default(),
            clean: StyleConfigEntry::default(),
        }
    }
}

#[derive(Default, Debug, Deserialize)]
pub struct StyleConfigEntry {
    #[serde(default)]
    fg: Option<Color>,
    #[serde(default)]
    bg: Option<Color>,
    #[serde(default)]
    mods: Option<Modifier>,
}

impl From<&StyleConfigEntry> for Style {
    fn from(val: &StyleConfigEntry) -> Self {
        Style {
            fg: val.fg,
            bg: val.bg,
            underline_color: None,
            add_modifier: val.mods.unwrap_or(Modifier::empty()),
            sub_modifier: Modifier::empty(),
        }
    }
}

/// Loads the bundled defaults, then the user's config file, then `GITPROMPT_*`
/// environment variables. Command line flags win over all of them.
pub fn init_config(args: &Args) -> Result<Config, Error> {
    let mut config = load(user_config_path())?;
    config.apply_args(args);
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    match etcetera::choose_base_strategy() {
        Ok(strategy) => Some(strategy.config_dir().join(APP_NAME).join("config.toml")),
        Err(err) => {
            log::warn!("Couldn't locate config directory: {}", err);
            None
        }
    }
}

fn load(path: Option<PathBuf>) -> Result<Config, Error> {
    let mut figment = Figment::from(Toml::string(DEFAULT_CONFIG));

    if let Some(path) = path {
        log::debug!("Reading config from {:?}", path);
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .map_err(Error::Config)
}
