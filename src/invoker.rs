use crate::settings::Settings;
use anyhow::Result;
use std::fmt;
use std::future::Future;

/// How a downstream function is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// Queued by the service; the caller does not wait for the function.
    FireAndForget,
    /// The caller waits for the function to finish and return its output.
    Blocking,
}

impl fmt::Display for InvocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationMode::FireAndForget => f.write_str("async"),
            InvocationMode::Blocking => f.write_str("sync"),
        }
    }
}

/// What came back from a single invocation. Only used for logging.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub mode: InvocationMode,
    pub status_code: i32,
    pub function_error: Option<String>,
    pub payload: Vec<u8>,
    pub elapsed: chrono::Duration,
}

/// Builds an invocation client for one request.
pub trait Connect {
    type Invoker: Invoke;

    fn connect(&self, settings: &Settings) -> impl Future<Output = Result<Self::Invoker>> + Send;
}

/// Client able to invoke a downstream function by name or ARN.
pub trait Invoke {
    fn fire_and_forget(
        &self,
        target: &str,
        payload: &[u8],
    ) -> impl Future<Output = Result<Outcome>> + Send;

    fn request_response(
        &self,
        target: &str,
        payload: &[u8],
    ) -> impl Future<Output = Result<Outcome>> + Send;
}
