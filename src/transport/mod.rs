//! Seam to the duplex node session that frames, correlates and times out
//! individual calls. Nothing in here touches a socket.

pub mod context;
pub mod node_transport;

pub use context::CallContext;
pub use node_transport::{Connector, NodeTransport, TransportError};
