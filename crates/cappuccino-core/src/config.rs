//! Run configuration

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable supplying the `exec` timeout in seconds
pub const EXEC_TIMEOUT_ENV: &str = "CAPPUCCINO_EXEC_TIMEOUT";

/// Branch cloned when none is given
pub const DEFAULT_BRANCH: &str = "master";

/// Everything a bootstrap run needs to know
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Repository to clone
    pub url: String,

    /// Branch to check out
    pub branch: String,

    /// Directory the clone is created in
    pub directory: PathBuf,

    /// Kill `exec` commands running longer than this; `None` waits forever
    pub exec_timeout: Option<Duration>,

    /// Run the warning scan after the manifest completes
    pub scan_warnings: bool,
}

impl RunConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            branch: DEFAULT_BRANCH.to_string(),
            directory: PathBuf::from("."),
            exec_timeout: None,
            scan_warnings: true,
        }
    }

    /// Fill unset values from the environment
    pub fn with_env_overrides(mut self) -> Self {
        if self.exec_timeout.is_none() {
            self.exec_timeout = std::env::var(EXEC_TIMEOUT_ENV)
                .ok()
                .and_then(|v| parse_timeout(&v));
        }
        self
    }
}

/// Parse a whole number of seconds; zero or garbage means no timeout
pub fn parse_timeout(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}
