//! Solver registry
//!
//! The registry maps solver names to solver instances so the server can
//! route `POST /apis/<group>/v1alpha1/<name>` without hardcoded matches.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use acme_webhook_core::SolverRegistry;
//!
//! let mut registry = SolverRegistry::new();
//! registry.register(Box::new(AutoDnsSolver::new()));
//! registry.initialize_all(kube::Config::infer().await?).await?;
//!
//! let registry = std::sync::Arc::new(registry);
//! ```
//!
//! Registration and initialization need `&mut`; once the registry is shared
//! behind an `Arc` it is read-only.

use crate::error::{Error, Result};
use crate::traits::Solver;
use std::collections::HashMap;

/// Name-keyed set of solvers
#[derive(Default)]
pub struct SolverRegistry {
    solvers: HashMap<String, Box<dyn Solver>>,
}

impl SolverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a solver under its own name
    ///
    /// A solver registered under a name that is already taken replaces the
    /// previous one.
    pub fn register(&mut self, solver: Box<dyn Solver>) {
        let name = solver.name().to_string();
        if self.solvers.insert(name.clone(), solver).is_some() {
            tracing::warn!("Replacing previously registered solver: {}", name);
        }
    }

    /// Look up a solver by name
    pub fn get(&self, name: &str) -> Result<&dyn Solver> {
        self.solvers
            .get(name)
            .map(|s| s.as_ref())
            .ok_or_else(|| Error::unknown_solver(name))
    }

    /// Check if a solver is registered
    pub fn has_solver(&self, name: &str) -> bool {
        self.solvers.contains_key(name)
    }

    /// List registered solver names, sorted
    pub fn list_solvers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.solvers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered solvers
    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    /// Whether no solver is registered
    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }

    /// Initialize every registered solver with the cluster credentials
    ///
    /// Stops at the first failure.
    pub async fn initialize_all(&mut self, cluster: kube::Config) -> Result<()> {
        for (name, solver) in self.solvers.iter_mut() {
            tracing::debug!("Initializing solver: {}", name);
            solver.initialize(cluster.clone()).await?;
        }
        Ok(())
    }
}
