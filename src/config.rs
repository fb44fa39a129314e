use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/state.json";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl Config {
    /// `PORT` and `APP_DATA_PATH` override the defaults.
    pub fn from_env() -> Self {
        Self::from_vars(env::var("PORT").ok(), env::var("APP_DATA_PATH").ok())
    }

    fn from_vars(port: Option<String>, data_path: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(port) = port.and_then(|value| value.trim().parse::<u16>().ok()) {
            config.port = port;
        }
        if let Some(path) = data_path.filter(|value| !value.is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        config
    }
}
