use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

/// Optional configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "scheduler.toml";

/// Prefix of the environment variables that override the file.
pub const ENV_PREFIX: &str = "TODO_";

const DEFAULT_DATABASE_FILE: &str = "scheduler.db";

/// Process configuration, built once in `main` and passed down by reference.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// SQLite database file (`TODO_DBFILE`)
    pub database_path: String,
    /// HTTP listen port (`TODO_PORT`)
    pub port: u16,
    /// HTTP bind address (`TODO_BIND`)
    pub bind: String,
    /// Directory of static front-end files (`TODO_WEB_DIR`)
    pub web_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            port: 7540,
            bind: "0.0.0.0".to_string(),
            web_dir: PathBuf::from("web"),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                if key.as_str().eq_ignore_ascii_case("dbfile") {
                    "database_path".into()
                } else {
                    key.as_str().into()
                }
            }))
    }
}

/// `scheduler.db` in the current working directory.
fn default_database_path() -> String {
    std::env::current_dir()
        .map(|dir| dir.join(DEFAULT_DATABASE_FILE))
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATABASE_FILE))
        .to_string_lossy()
        .into_owned()
}
