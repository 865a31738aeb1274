pub mod manager;
pub mod replica_session;

pub use manager::{Replica, ReplicaManager};
pub use replica_session::ReplicaSession;
