use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub bind_address: String,
    pub port: u16,
    /// Largest accepted request body, uploads included
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ApiConfig {
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        self.level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow::anyhow!("invalid log level '{}'", self.level))
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.logging.level_filter()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.listen_address(), "127.0.0.1:8080");
        assert_eq!(config.api.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
api:
  port: 9090
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.port, 9090);
        assert_eq!(config.api.bind_address, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phishhawk.yaml");
        let path = path.to_str().unwrap();

        let mut config = Config::default();
        config.api.bind_address = "0.0.0.0".to_string();
        config.logging.level = "debug".to_string();
        config.to_file(path).unwrap();

        assert_eq!(Config::from_file(path).unwrap(), config);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "logging:\n  level: loud\n").unwrap();
        assert!(Config::from_file(path.to_str().unwrap()).is_err());
    }
}
