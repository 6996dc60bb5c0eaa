// # acme-webhook-core
//
// Core library for cert-manager ACME DNS-01 webhook solvers.
//
// ## Architecture Overview
//
// - **Solver**: Trait every DNS-01 solver implements (`name`, `initialize`,
//   `present`, `cleanup`)
// - **ChallengePayload**: The webhook wire envelope carrying a challenge
//   request in and a challenge response out
// - **SolverRegistry**: Name-keyed set of solvers served by one process
// - **server**: HTTP routes that decode payloads and dispatch them to solvers
// - **WebhookConfig**: Explicit startup configuration (group name, listener)
//
// ## Design Principles
//
// 1. **Thin Adapter**: Solvers translate one challenge into one provider call
// 2. **No Hidden State**: Solvers are immutable once initialized
// 3. **Caller Owns Retries**: Failures are reported, never retried here
// 4. **Library-First**: The daemon only wires these pieces together

pub mod traits;
pub mod challenge;
pub mod registry;
pub mod config;
pub mod error;
pub mod server;

// Re-export core types for convenience
pub use traits::Solver;
pub use challenge::{ChallengeAction, ChallengePayload, ChallengeRequest, ChallengeResponse};
pub use registry::SolverRegistry;
pub use config::WebhookConfig;
pub use error::{Error, Result};
