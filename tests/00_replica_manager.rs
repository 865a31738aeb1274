mod support;

use std::{sync::Arc, time::Duration};

use tokio::{sync::Barrier, time::Instant};

use replica_session::{PoolError, ReplicaManager, SessionConfig, TransportError};
use support::{ADDR_1, ADDR_2, CountingConnector};

#[tokio::test]
async fn same_address_returns_same_session() {
    let connector = CountingConnector::default();
    let rm = ReplicaManager::new(connector.clone());

    let first = rm.get_replica(ADDR_1).unwrap();
    let second = rm.get_replica(ADDR_1).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(connector.created(), 1);
}

#[tokio::test]
async fn count_follows_distinct_addresses() {
    let rm = ReplicaManager::new(CountingConnector::default());
    assert_eq!(rm.replica_count(), 0);

    let first = rm.get_replica(ADDR_1).unwrap();
    assert_eq!(rm.replica_count(), 1);

    rm.get_replica(ADDR_2).unwrap();
    assert_eq!(rm.replica_count(), 2);

    let again = rm.get_replica(ADDR_1).unwrap();
    assert_eq!(rm.replica_count(), 2);
    assert!(Arc::ptr_eq(&first, &again));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_callers_share_one_construction() {
    const CALLERS: usize = 100;

    let connector = CountingConnector::default();
    let rm = Arc::new(ReplicaManager::new(connector.clone()));
    let barrier = Arc::new(Barrier::new(CALLERS));

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let rm = rm.clone();
            let barrier = barrier.clone();
            tokio::spawn(async move {
                barrier.wait().await;
                rm.get_replica(ADDR_1).unwrap()
            })
        })
        .collect();

    let mut sessions = Vec::with_capacity(CALLERS);
    for handle in handles {
        sessions.push(handle.await.unwrap());
    }

    assert_eq!(connector.created(), 1);
    assert_eq!(rm.replica_count(), 1);
    assert!(sessions.iter().all(|s| Arc::ptr_eq(s, &sessions[0])));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_callers_across_addresses() {
    const ADDRESSES: usize = 16;
    const REPEATS: usize = 8;

    let connector = CountingConnector::default();
    let rm = Arc::new(ReplicaManager::new(connector.clone()));

    let handles: Vec<_> = (0..ADDRESSES * REPEATS)
        .map(|i| {
            let rm = rm.clone();
            tokio::spawn(async move {
                let addr = format!("10.0.1.{}:34801", i % ADDRESSES);
                rm.get_replica(&addr).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(rm.replica_count(), ADDRESSES);
    assert_eq!(connector.created(), ADDRESSES);
}

#[tokio::test(start_paused = true)]
async fn close_waits_for_every_session() {
    let connector = CountingConnector {
        close_delay: Duration::from_millis(300),
        ..Default::default()
    };
    let rm = ReplicaManager::new(connector);

    let sessions: Vec<_> = ["10.0.0.1:34801", "10.0.0.2:34801", "10.0.0.3:34801"]
        .into_iter()
        .map(|addr| rm.get_replica(addr).unwrap())
        .collect();

    let started = Instant::now();
    rm.close().await.unwrap();
    let elapsed = started.elapsed();

    assert!(sessions.iter().all(|s| s.transport().is_closed()));
    assert!(elapsed >= Duration::from_millis(300));
    // Closes overlap instead of queuing behind each other.
    assert!(elapsed < Duration::from_millis(600), "took {elapsed:?}");
}

#[tokio::test]
async fn close_reports_every_failure() {
    let connector = CountingConnector {
        failing_addrs: vec![ADDR_1, ADDR_2],
        ..Default::default()
    };
    let rm = ReplicaManager::new(connector);
    let healthy = rm.get_replica("10.0.0.3:34801").unwrap();
    rm.get_replica(ADDR_1).unwrap();
    rm.get_replica(ADDR_2).unwrap();

    let failures = match rm.close().await.unwrap_err() {
        PoolError::CloseFailed { failures } => failures,
        other => panic!("expected CloseFailed, got {other:?}"),
    };

    let mut addrs: Vec<_> = failures.iter().map(|f| f.addr.as_str()).collect();
    addrs.sort();
    assert_eq!(addrs, vec![ADDR_1, ADDR_2]);
    assert!(
        failures
            .iter()
            .all(|f| matches!(f.source, TransportError::Other(_)))
    );
    assert!(healthy.transport().is_closed());
}

#[tokio::test(start_paused = true)]
async fn close_timeout_bounds_a_stuck_session() {
    let connector = CountingConnector {
        close_delay: Duration::from_secs(60),
        ..Default::default()
    };
    let config = SessionConfig {
        close_timeout: Some(Duration::from_secs(1)),
        ..Default::default()
    };
    let rm = ReplicaManager::with_config(connector, &config);
    let stuck = rm.get_replica(ADDR_1).unwrap();

    let started = Instant::now();
    let err = rm.close().await.unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(matches!(
        err,
        PoolError::CloseFailed { ref failures }
            if failures.len() == 1 && matches!(failures[0].source, TransportError::Timeout)
    ));
    assert!(!stuck.transport().is_closed());

    // The timed-out close is not abandoned.
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert!(stuck.transport().is_closed());
}

#[tokio::test]
async fn closed_manager_is_terminal() {
    let connector = CountingConnector::default();
    let rm = ReplicaManager::new(connector.clone());
    rm.get_replica(ADDR_1).unwrap();

    rm.close().await.unwrap();

    assert!(rm.is_closed());
    assert_eq!(rm.replica_count(), 0);
    assert!(matches!(rm.get_replica(ADDR_2), Err(PoolError::Closed)));
    assert_eq!(connector.created(), 1);
}
