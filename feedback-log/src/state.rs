use std::sync::Arc;

use super::{config::Config, log_file::FeedbackLog};

pub struct AppState {
    pub config: Config,
    pub log: FeedbackLog,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let log = FeedbackLog::new(config.log_path.clone());
        Arc::new(Self { config, log })
    }
}
