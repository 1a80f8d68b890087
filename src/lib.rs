pub mod errors;
pub mod forwarder;
pub mod invoker;
pub mod my_aws;
pub mod response;
pub mod settings;

pub use errors::ForwardError;
pub use forwarder::Forwarder;
pub use invoker::{Connect, InvocationMode, Invoke, Outcome};
pub use my_aws::{LambdaConnector, LambdaInvoker};
pub use settings::Settings;
