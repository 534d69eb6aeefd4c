pub mod broker;
pub mod device;

pub use broker::{BrokerResponse, HealthStatus, SessionBroker, SessionRequest};
pub use device::resolve_device_id;
