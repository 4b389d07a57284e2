use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_PATH: &str = "feedback.txt";

pub struct Config {
    pub port: u16,
    pub log_path: PathBuf,
    pub allowed_origin: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("FEEDBACK_PORT", DEFAULT_PORT),
            log_path: var("FEEDBACK_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    info!("FEEDBACK_LOG_PATH not set, using default: {DEFAULT_LOG_PATH}");
                    PathBuf::from(DEFAULT_LOG_PATH)
                }),
            allowed_origin: var("FEEDBACK_ALLOWED_ORIGIN").ok(),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("Environment variable {key} not found");
    })
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Ok(raw) = var(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
