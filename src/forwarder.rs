use crate::errors::ForwardError;
use crate::invoker::{Connect, Invoke, Outcome};
use crate::response;
use crate::settings::Settings;
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use log::{debug, error, info, warn};
use serde::Serialize;

/// Relays a gateway request to the configured downstream function, first
/// fire-and-forget and then blocking, and answers with a fixed envelope.
pub struct Forwarder<C> {
    settings: Settings,
    connector: C,
}

impl<C: Connect> Forwarder<C> {
    pub fn new(settings: Settings, connector: C) -> Self {
        Forwarder {
            settings,
            connector,
        }
    }

    /// Never fails: every error is turned into a 500 envelope.
    pub async fn handle<E: Serialize>(&self, event: &E) -> ApiGatewayProxyResponse {
        match self.forward(event).await {
            Ok(()) => response::accepted(),
            Err(err) => {
                debug!("answering with {err}");
                response::failure(&err)
            }
        }
    }

    async fn forward<E: Serialize>(&self, event: &E) -> Result<(), ForwardError> {
        let target = self.settings.destination().ok_or_else(|| {
            error!("destinationlambda is not set");
            ForwardError::MissingTarget
        })?;
        info!("forwarding to {target}");

        let invoker = self.connector.connect(&self.settings).await.map_err(|source| {
            error!("cannot build lambda client: {source:#}");
            ForwardError::Config(source)
        })?;

        let payload = serde_json::to_vec(event).map_err(|source| {
            error!("cannot serialize request: {source}");
            ForwardError::Marshal(source)
        })?;

        let outcome = invoker
            .fire_and_forget(target, &payload)
            .await
            .map_err(|source| {
                error!("{source:#}");
                ForwardError::AsyncDispatch(source)
            })?;
        log_outcome(&outcome);

        let outcome = invoker
            .request_response(target, &payload)
            .await
            .map_err(|source| {
                error!("{source:#}");
                ForwardError::SyncDispatch(source)
            })?;
        log_outcome(&outcome);

        Ok(())
    }
}

fn log_outcome(outcome: &Outcome) {
    info!(
        "{} call returned {} after {}ms",
        outcome.mode,
        outcome.status_code,
        outcome.elapsed.num_milliseconds()
    );
    if let Some(function_error) = &outcome.function_error {
        warn!("{} call reported function error: {function_error}", outcome.mode);
    }
    debug!(
        "{} payload: {}",
        outcome.mode,
        String::from_utf8_lossy(&outcome.payload)
    );
}
