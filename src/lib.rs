pub mod config;
pub mod errors;
pub mod rrdb;
pub mod session;
pub mod telemetry;
pub mod transport;

pub use config::{ConfigError, LogLevel, SessionConfig};
pub use errors::{CloseFailure, PoolError, SessionError};
pub use session::{Replica, ReplicaManager, ReplicaSession};
pub use transport::{CallContext, Connector, NodeTransport, TransportError};
