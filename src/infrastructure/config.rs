use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub web: WebSettings,
    pub upstream: UpstreamSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebSettings {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DemosConfig {
    #[serde(default)]
    pub demos: HashMap<String, DemoConfig>,
}

/// Per-demo polling setup. `params` is a dashboard URL query string
/// overlaid on the page defaults, so a shared dashboard link can be
/// reproduced verbatim in the config file.
#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    #[serde(default)]
    pub poll: bool,
    #[serde(default)]
    pub params: Option<String>,
    #[serde(default)]
    pub on_error: OnError,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_backoff_seconds")]
    pub retry_backoff_seconds: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    #[default]
    Halt,
    Retry,
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_backoff_seconds() -> u64 {
    5
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_demos_config() -> anyhow::Result<DemosConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/demos"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> DemosConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_demo_defaults() {
        let demos = parse("[demos.dimensions]\n").demos;
        let demo = &demos["dimensions"];
        assert!(!demo.poll);
        assert_eq!(demo.params, None);
        assert_eq!(demo.on_error, OnError::Halt);
        assert_eq!(demo.retry_attempts, 3);
        assert_eq!(demo.retry_backoff_seconds, 5);
    }

    #[test]
    fn test_retry_demo_parses() {
        let demos = parse(
            "[demos.dimensions]\n\
             poll = true\n\
             params = \"refresh=10&play=60\"\n\
             on_error = \"retry\"\n\
             retry_attempts = 5\n",
        )
        .demos;
        let demo = &demos["dimensions"];
        assert!(demo.poll);
        assert_eq!(demo.params.as_deref(), Some("refresh=10&play=60"));
        assert_eq!(demo.on_error, OnError::Retry);
        assert_eq!(demo.retry_attempts, 5);
    }
}
