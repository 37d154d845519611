use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineConfig {
    /// Fixed RNG seed. Unset means a fresh thread-local generator per request.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment overlay, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SKYPULSE__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("SKYPULSE").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<Config, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_engine_section_is_optional() {
        let cfg = from_toml("[server]\nport = 3000\n").unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.engine.seed, None);
    }

    #[test]
    fn test_seed_is_read() {
        let cfg = from_toml("[server]\nport = 8080\n[engine]\nseed = 42\n").unwrap();
        assert_eq!(cfg.engine.seed, Some(42));
    }

    #[test]
    fn test_missing_server_section_fails() {
        assert!(from_toml("[engine]\nseed = 1\n").is_err());
    }
}
