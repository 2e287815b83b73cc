pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod stream;

pub use config::StreamcastConfig;
pub use error::{Result, StreamcastError};
pub use request::{IntentName, Request, RequestEnvelope, RequestKind};
pub use response::{Directive, Response, ResponseBuilder, ResponseEnvelope};
pub use stream::StreamDescriptor;
