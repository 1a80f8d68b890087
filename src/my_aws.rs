use crate::invoker::{Connect, InvocationMode, Invoke, Outcome};
use crate::settings::Settings;
use anyhow::{anyhow, bail, Context, Result};
use aws_config::{BehaviorVersion, ConfigLoader};
use aws_credential_types::Credentials;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use aws_smithy_types::retry::RetryConfig;
use aws_smithy_types::timeout::TimeoutConfig;
use aws_types::region::Region;
use chrono::Utc;

/// Connects to the Lambda API of the configured region.
///
/// A fresh SDK config is resolved on every call. Retries are pinned to a
/// single attempt so a failed dispatch surfaces immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct LambdaConnector;

impl LambdaConnector {
    fn loader(settings: &Settings) -> Result<ConfigLoader> {
        let region = settings.region().ok_or_else(|| anyhow!("AWS_REGION is not set"))?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_owned()))
            .retry_config(RetryConfig::standard().with_max_attempts(1));

        if settings.call_timeout().is_some() || settings.attempt_timeout().is_some() {
            let mut timeouts = TimeoutConfig::builder();
            if let Some(timeout) = settings.call_timeout() {
                timeouts = timeouts.operation_timeout(timeout);
            }
            if let Some(timeout) = settings.attempt_timeout() {
                timeouts = timeouts.operation_attempt_timeout(timeout);
            }
            loader = loader.timeout_config(timeouts.build());
        }

        if let Some(endpoint) = settings.endpoint_url() {
            let uri = endpoint
                .parse::<http::Uri>()
                .with_context(|| format!("invalid endpoint url: {endpoint}"))?;
            if !matches!(uri.scheme_str(), Some("http" | "https")) || uri.authority().is_none() {
                bail!("endpoint url needs an http(s) scheme and a host: {endpoint}");
            }

            // local emulators accept any credentials
            let credentials = Credentials::new(
                "localAccessKey",
                "localSecretAccessKey",
                None,
                None,
                "local",
            );
            loader = loader.endpoint_url(endpoint).credentials_provider(credentials);
        }

        Ok(loader)
    }
}

impl Connect for LambdaConnector {
    type Invoker = LambdaInvoker;

    async fn connect(&self, settings: &Settings) -> Result<LambdaInvoker> {
        let config = Self::loader(settings)?.load().await;
        Ok(LambdaInvoker::new(aws_sdk_lambda::Client::new(&config)))
    }
}

#[derive(Clone, Debug)]
pub struct LambdaInvoker {
    client: aws_sdk_lambda::Client,
}

impl LambdaInvoker {
    pub fn new(client: aws_sdk_lambda::Client) -> Self {
        LambdaInvoker { client }
    }

    async fn invoke(
        &self,
        mode: InvocationMode,
        function_name: &str,
        payload: &[u8],
    ) -> Result<Outcome> {
        let started = Utc::now();
        let response = self
            .client
            .invoke()
            .function_name(function_name)
            .payload(Blob::new(payload))
            .invocation_type(InvocationType::from(mode))
            .send()
            .await
            .with_context(|| format!("{mode} invoke of {function_name} failed"))?;

        Ok(Outcome {
            mode,
            status_code: response.status_code(),
            function_error: response.function_error().map(str::to_owned),
            payload: response
                .payload()
                .map(|blob| blob.as_ref().to_vec())
                .unwrap_or_default(),
            elapsed: Utc::now() - started,
        })
    }
}

impl Invoke for LambdaInvoker {
    async fn fire_and_forget(&self, target: &str, payload: &[u8]) -> Result<Outcome> {
        self.invoke(InvocationMode::FireAndForget, target, payload).await
    }

    async fn request_response(&self, target: &str, payload: &[u8]) -> Result<Outcome> {
        self.invoke(InvocationMode::Blocking, target, payload).await
    }
}

impl From<InvocationMode> for InvocationType {
    fn from(mode: InvocationMode) -> Self {
        match mode {
            InvocationMode::FireAndForget => InvocationType::Event,
            InvocationMode::Blocking => InvocationType::RequestResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_map_to_invocation_types() {
        assert_eq!(
            InvocationType::from(InvocationMode::FireAndForget),
            InvocationType::Event
        );
        assert_eq!(
            InvocationType::from(InvocationMode::Blocking),
            InvocationType::RequestResponse
        );
    }

    #[tokio::test]
    async fn connect_requires_a_region() {
        let settings = Settings::default().with_destination("worker");

        let err = LambdaConnector.connect(&settings).await.unwrap_err();
        assert!(err.to_string().contains("AWS_REGION"));
    }

    #[tokio::test]
    async fn connect_rejects_malformed_endpoint() {
        let settings = Settings::default()
            .with_region("local")
            .with_endpoint_url("http://local host:3002");

        assert!(LambdaConnector.connect(&settings).await.is_err());
    }

    #[tokio::test]
    async fn connect_rejects_endpoint_without_scheme_or_host() {
        for endpoint in ["localhost:3002", "/invocations", "ftp://localhost:3002"] {
            let settings = Settings::default()
                .with_region("local")
                .with_endpoint_url(endpoint);

            let err = LambdaConnector.connect(&settings).await.unwrap_err();
            assert!(err.to_string().contains(endpoint), "{endpoint}: {err}");
        }
    }

    #[tokio::test]
    async fn connect_with_local_endpoint() {
        let settings = Settings::default()
            .with_region("local")
            .with_endpoint_url("http://localhost:3002/");

        assert!(LambdaConnector.connect(&settings).await.is_ok());
    }
}
