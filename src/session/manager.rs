use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use parking_lot::RwLock;
use tokio::task::JoinError;
use tokio::time::timeout;
use tracing::{info, warn};

use super::replica_session::ReplicaSession;
use crate::config::SessionConfig;
use crate::errors::{CloseFailure, PoolError};
use crate::transport::{Connector, TransportError};

// -----------------------------------------------------------------------------
// ----- ReplicaManager --------------------------------------------------------

/// Session shared by every table and partition hosted on one address.
pub type Replica<C> = Arc<ReplicaSession<<C as Connector>::Transport>>;

/// Pool of replica sessions keyed by address.
///
/// Tables whose partitions live on the same server share one session, and
/// with it one connection. Once [`ReplicaManager::close`] ran the manager
/// refuses to create sessions again.
pub struct ReplicaManager<C: Connector> {
    connector: C,
    close_timeout: Option<Duration>,
    state: RwLock<ManagerState<C::Transport>>,
}

struct ManagerState<T> {
    // rpc address -> replica
    replicas: HashMap<String, Arc<ReplicaSession<T>>>,
    closed: bool,
}

// -----------------------------------------------------------------------------
// ----- ReplicaManager: Static ------------------------------------------------

impl<C: Connector> ReplicaManager<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            close_timeout: None,
            state: RwLock::new(ManagerState {
                replicas: HashMap::new(),
                closed: false,
            }),
        }
    }

    pub fn with_config(connector: C, config: &SessionConfig) -> Self {
        let mut manager = Self::new(connector);
        manager.close_timeout = config.close_timeout;
        manager
    }
}

// -----------------------------------------------------------------------------
// ----- ReplicaManager: Public ------------------------------------------------

impl<C: Connector> ReplicaManager<C> {
    /// Returns the session for `addr`, creating it if none exists yet.
    pub fn get_replica(&self, addr: &str) -> Result<Replica<C>, PoolError> {
        {
            let state = self.state.read();
            if state.closed {
                return Err(PoolError::Closed);
            }
            if let Some(replica) = state.replicas.get(addr) {
                return Ok(replica.clone());
            }
        }

        let mut state = self.state.write();

        // Another caller may have inserted between the two locks.
        if state.closed {
            return Err(PoolError::Closed);
        }
        if let Some(replica) = state.replicas.get(addr) {
            return Ok(replica.clone());
        }

        let replica = Arc::new(ReplicaSession::new(addr, self.connector.connect(addr)));
        state.replicas.insert(addr.to_string(), replica.clone());
        info!("created session {replica}");

        Ok(replica)
    }

    /// Closes every session and waits for all of them.
    ///
    /// Sessions close concurrently; the lock is only held to take them out of
    /// the map. Every failure is reported, not just the first one. With a
    /// close timeout configured, a session that overruns it is reported as
    /// timed out while its close keeps running in the background.
    pub async fn close(&self) -> Result<(), PoolError> {
        let replicas: Vec<_> = {
            let mut state = self.state.write();
            state.closed = true;
            state.replicas.drain().map(|(_, replica)| replica).collect()
        };

        if replicas.is_empty() {
            return Ok(());
        }

        info!("closing {} replica sessions", replicas.len());

        let close_timeout = self.close_timeout;
        let results = join_all(replicas.iter().map(|replica| {
            let closing = replica.clone();
            let handle = tokio::spawn(async move { closing.close().await });

            async move {
                let res = match close_timeout {
                    Some(limit) => match timeout(limit, handle).await {
                        Ok(joined) => joined.unwrap_or_else(|e| Err(close_task_failed(e))),
                        Err(_) => {
                            warn!("{replica} still closing after {limit:?}, leaving it to finish");
                            Err(TransportError::Timeout)
                        }
                    },
                    None => handle.await.unwrap_or_else(|e| Err(close_task_failed(e))),
                };
                (replica, res)
            }
        }))
        .await;

        let failures: Vec<CloseFailure> = results
            .into_iter()
            .filter_map(|(replica, res)| {
                let source = res.err()?;
                warn!("failed to close {replica}: {source}");
                Some(CloseFailure {
                    addr: replica.addr().to_string(),
                    source,
                })
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(PoolError::CloseFailed { failures })
        }
    }

    pub fn replica_count(&self) -> usize {
        self.state.read().replicas.len()
    }

    /// Registered addresses, sorted.
    pub fn addresses(&self) -> Vec<String> {
        let mut addrs: Vec<String> = self.state.read().replicas.keys().cloned().collect();
        addrs.sort();
        addrs
    }

    pub fn is_closed(&self) -> bool {
        self.state.read().closed
    }
}

fn close_task_failed(err: JoinError) -> TransportError {
    TransportError::Other(format!("close task failed: {err}"))
}

impl<C: Connector> fmt::Debug for ReplicaManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("ReplicaManager")
            .field("replicas", &state.replicas.len())
            .field("closed", &state.closed)
            .field("close_timeout", &self.close_timeout)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
