use config::{Config, ConfigError, Environment, File, Map};
use serde::{de, Deserialize, Deserializer};
use std::time::Duration;

/// Process configuration, resolved once at start-up.
///
/// Keys come from an optional `forwarder.{json,toml}` file, overridden by
/// environment variables. Environment keys are lowercased, so
/// `destinationlambda`, `AWS_REGION` and `FORWARDER_ENDPOINT_URL` map onto
/// the fields below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(rename = "destinationlambda")]
    destination: Option<String>,
    #[serde(rename = "aws_region")]
    region: Option<String>,
    #[serde(rename = "forwarder_endpoint_url")]
    endpoint_url: Option<String>,
    #[serde(rename = "forwarder_call_timeout_ms", default, deserialize_with = "millis")]
    call_timeout_ms: Option<u64>,
    #[serde(rename = "forwarder_attempt_timeout_ms", default, deserialize_with = "millis")]
    attempt_timeout_ms: Option<u64>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_env_map(None)
    }

    /// Like [`Settings::new`], but reads environment keys from `env` instead
    /// of the process environment when given.
    pub fn from_env_map(env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("forwarder").required(false))
            .add_source(Environment::default().source(env))
            .build()?;

        s.try_deserialize()
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn destination(&self) -> Option<&str> {
        non_blank(&self.destination)
    }

    pub fn region(&self) -> Option<&str> {
        non_blank(&self.region)
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        non_blank(&self.endpoint_url)
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_ms.map(Duration::from_millis)
    }

    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout_ms.map(Duration::from_millis)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    non_blank(&value)
        .map(|s| s.parse().map_err(de::Error::custom))
        .transpose()
}
