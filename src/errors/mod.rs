use thiserror::Error;

/// Why a request was not forwarded.
///
/// `Display` is the message returned to the caller; causes are only logged.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("no arn found")]
    MissingTarget,
    #[error("cannot create config")]
    Config(#[source] anyhow::Error),
    #[error("cannot marshal data")]
    Marshal(#[source] serde_json::Error),
    #[error("error on async")]
    AsyncDispatch(#[source] anyhow::Error),
    #[error("error on sync")]
    SyncDispatch(#[source] anyhow::Error),
}
