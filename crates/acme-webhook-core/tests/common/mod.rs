//! Test doubles shared by the dispatch contract tests

use acme_webhook_core::error::{Error, Result};
use acme_webhook_core::{ChallengeAction, ChallengeRequest, Solver};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A solver that records every call and optionally fails
pub struct RecordingSolver {
    /// Solver name
    pub name: &'static str,
    /// Call counter for present()
    present_call_count: Arc<AtomicUsize>,
    /// Call counter for cleanup()
    cleanup_call_count: Arc<AtomicUsize>,
    /// Call counter for initialize()
    initialize_call_count: Arc<AtomicUsize>,
    /// Actions seen, in order
    seen: Arc<std::sync::Mutex<Vec<(ChallengeAction, String)>>>,
    /// Error message to fail every challenge with
    fail_with: Option<&'static str>,
}

impl RecordingSolver {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            present_call_count: Arc::new(AtomicUsize::new(0)),
            cleanup_call_count: Arc::new(AtomicUsize::new(0)),
            initialize_call_count: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(std::sync::Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    /// Make every challenge fail with `message`
    pub fn failing(name: &'static str, message: &'static str) -> Self {
        Self {
            fail_with: Some(message),
            ..Self::new(name)
        }
    }

    /// Create a solver that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            name: other.name,
            present_call_count: Arc::clone(&other.present_call_count),
            cleanup_call_count: Arc::clone(&other.cleanup_call_count),
            initialize_call_count: Arc::clone(&other.initialize_call_count),
            seen: Arc::clone(&other.seen),
            fail_with: other.fail_with,
        }
    }

    pub fn present_call_count(&self) -> usize {
        self.present_call_count.load(Ordering::SeqCst)
    }

    pub fn cleanup_call_count(&self) -> usize {
        self.cleanup_call_count.load(Ordering::SeqCst)
    }

    pub fn initialize_call_count(&self) -> usize {
        self.initialize_call_count.load(Ordering::SeqCst)
    }

    /// Actions and FQDNs seen so far
    pub fn seen(&self) -> Vec<(ChallengeAction, String)> {
        self.seen.lock().unwrap().clone()
    }

    fn outcome(&self) -> Result<()> {
        match self.fail_with {
            Some(msg) => Err(Error::Other(msg.to_string())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl Solver for RecordingSolver {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn initialize(&mut self, _cluster: kube::Config) -> Result<()> {
        self.initialize_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn present(&self, request: &ChallengeRequest) -> Result<()> {
        self.present_call_count.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((ChallengeAction::Present, request.resolved_fqdn.clone()));
        self.outcome()
    }

    async fn cleanup(&self, request: &ChallengeRequest) -> Result<()> {
        self.cleanup_call_count.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((ChallengeAction::CleanUp, request.resolved_fqdn.clone()));
        self.outcome()
    }
}

/// Challenge for `fqdn` under `example.com`
pub fn challenge(action: ChallengeAction, uid: &str, fqdn: &str) -> ChallengeRequest {
    let mut request = ChallengeRequest::new(action, "example.com", fqdn, "abc123");
    request.uid = uid.to_string();
    request
}

/// Cluster config pointing nowhere; test solvers never dial it
pub fn cluster_config() -> kube::Config {
    kube::Config::new("http://127.0.0.1:6443".parse().unwrap())
}
