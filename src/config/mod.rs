pub mod models;

pub use models::{Config, PiholeConfig, RecordConfig, ZoneConfig};

use anyhow::{Context, Result};
use std::{env, fs::File, io::Read};
use validator::Validate;

/// Overrides `pihole.password` from the file when set.
pub const PASSWORD_ENV: &str = "PIHOLE_PASSWORD";

impl Config {
    pub fn load(config_file: &str) -> Result<Config> {
        let mut file = File::open(config_file)
            .with_context(|| format!("Failed to open config file: {}", config_file))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("Failed to read config file: {}", config_file))?;

        let password = env::var(PASSWORD_ENV).ok();
        Self::parse(&contents, password)
            .with_context(|| format!("Invalid config file: {}", config_file))
    }

    /// Parses and validates a YAML document. `password`, when given, wins
    /// over the one in the document.
    pub fn parse(contents: &str, password: Option<String>) -> Result<Config> {
        let mut config: Config =
            serde_yaml::from_str(contents).context("Failed to parse config")?;

        if let Some(password) = password {
            config.pihole.password = password;
        }

        config.validate()?;
        Ok(config)
    }
}
