use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_forwarder::{Forwarder, LambdaConnector, Settings};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use log::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let settings = Settings::new()?;
    match settings.destination() {
        Some(destination) => info!("destination: {destination}"),
        None => warn!("destinationlambda is not set, every request will fail"),
    }

    let forwarder = Forwarder::new(settings, LambdaConnector);
    lambda_runtime::run(service_fn(|event| handle_event(event, &forwarder))).await
}

async fn handle_event(
    event: LambdaEvent<ApiGatewayProxyRequest>,
    forwarder: &Forwarder<LambdaConnector>,
) -> Result<ApiGatewayProxyResponse, Error> {
    Ok(forwarder.handle(&event.payload).await)
}
