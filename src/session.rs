use std::time::Duration;

/// Timing knobs for a competitive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub round_secs: u32,
    pub time_up_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            round_secs: 60,
            time_up_delay: Duration::from_millis(3_000),
        }
    }
}

impl From<&crate::config::Config> for SessionConfig {
    fn from(cfg: &crate::config::Config) -> Self {
        Self {
            round_secs: cfg.round_secs,
            time_up_delay: Duration::from_millis(cfg.time_up_delay_ms),
        }
    }
}

/// Where the session is between its first round and the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Running,
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn from_config() {
        let cfg = Config {
            round_secs: 30,
            time_up_delay_ms: 500,
            ..Config::default()
        };
        let session = SessionConfig::from(&cfg);

        assert_eq!(session.round_secs, 30);
        assert_eq!(session.time_up_delay, Duration::from_millis(500));
    }

    #[test]
    fn defaults_match_default_config() {
        assert_eq!(SessionConfig::from(&Config::default()), SessionConfig::default());
    }
}
