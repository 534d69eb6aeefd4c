//! ChatKit Relay Library
//!
//! Minimal backend relay that keeps the OpenAI API key server-side,
//! creates ChatKit sessions on behalf of a frontend widget, and returns
//! the resulting client secret to the caller.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use domain::config::{Credentials, RelayConfig};
pub use domain::error::{RelayError, RelayResult};
pub use core::broker::{BrokerResponse, HealthStatus, SessionBroker, SessionRequest};
pub use core::upstream::{SessionApi, UpstreamSessionRequest, UpstreamSessionResponse, WorkflowRef};
pub use infrastructure::http::{router, RelayServer};
pub use infrastructure::openai::OpenAiSessionClient;
