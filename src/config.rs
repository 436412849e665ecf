use std::collections::HashMap;

use tracing_subscriber::filter::LevelFilter;

use crate::error::ConfigError;

/// Read-only access to environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggerConfig {
    pub level: LevelFilter,
    pub sample_rate: f64,
    pub log_event: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            sample_rate: 0.1,
            log_event: true,
        }
    }
}

impl LoggerConfig {
    pub fn from_env(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let level = env
            .var("POWERTOOLS_LOG_LEVEL")
            .or_else(|| env.var("LOG_LEVEL"));
        if let Some(level) = level {
            config.level = parse_level(&level)?;
        }

        if let Some(rate) = env.var("POWERTOOLS_LOGGER_SAMPLE_RATE") {
            config.sample_rate = match rate.trim().parse::<f64>() {
                Ok(r) if (0.0..=1.0).contains(&r) => r,
                _ => return Err(ConfigError::invalid("POWERTOOLS_LOGGER_SAMPLE_RATE", rate)),
            };
        }

        if let Some(flag) = env.var("POWERTOOLS_LOGGER_LOG_EVENT") {
            config.log_event = match flag.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => return Err(ConfigError::invalid("POWERTOOLS_LOGGER_LOG_EVENT", flag)),
            };
        }

        Ok(config)
    }
}

fn parse_level(value: &str) -> Result<LevelFilter, ConfigError> {
    match value.trim().to_ascii_uppercase().as_str() {
        "DEBUG" => Ok(LevelFilter::DEBUG),
        "INFO" => Ok(LevelFilter::INFO),
        "WARN" | "WARNING" => Ok(LevelFilter::WARN),
        "ERROR" | "CRITICAL" => Ok(LevelFilter::ERROR),
        _ => Err(ConfigError::invalid("POWERTOOLS_LOG_LEVEL", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_unset() {
        let config = LoggerConfig::from_env(&env(&[])).unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.level, LevelFilter::INFO);
        assert!(config.log_event);
    }

    #[test]
    fn powertools_level_wins_over_log_level() {
        let config = LoggerConfig::from_env(&env(&[
            ("POWERTOOLS_LOG_LEVEL", "debug"),
            ("LOG_LEVEL", "ERROR"),
        ]))
        .unwrap();
        assert_eq!(config.level, LevelFilter::DEBUG);

        let config = LoggerConfig::from_env(&env(&[("LOG_LEVEL", "WARNING")])).unwrap();
        assert_eq!(config.level, LevelFilter::WARN);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(LoggerConfig::from_env(&env(&[("LOG_LEVEL", "loud")])).is_err());
        assert!(
            LoggerConfig::from_env(&env(&[("POWERTOOLS_LOGGER_SAMPLE_RATE", "1.5")])).is_err()
        );
        assert!(LoggerConfig::from_env(&env(&[("POWERTOOLS_LOGGER_LOG_EVENT", "maybe")])).is_err());
    }

    #[test]
    fn reads_sample_rate_and_event_flag() {
        let config = LoggerConfig::from_env(&env(&[
            ("POWERTOOLS_LOGGER_SAMPLE_RATE", "0.5"),
            ("POWERTOOLS_LOGGER_LOG_EVENT", "false"),
        ]))
        .unwrap();
        assert_eq!(config.sample_rate, 0.5);
        assert!(!config.log_event);
    }
}
