// # Solver Trait
//
// Defines the interface a DNS-01 challenge solver exposes to the webhook
// server.
//
// ## Implementations
//
// - AutoDNS: `acme-webhook-autodns` crate
//
// ## Usage
//
// ```rust,ignore
// use acme_webhook_core::{ChallengeRequest, Solver};
//
// async fn publish(solver: &dyn Solver, request: &ChallengeRequest) -> acme_webhook_core::Result<()> {
//     solver.present(request).await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::challenge::ChallengeRequest;

/// Trait for DNS-01 challenge solver implementations
///
/// A solver publishes (`present`) and removes (`cleanup`) the TXT record a
/// certificate authority checks during a DNS-01 challenge.
///
/// # Thread Safety
///
/// Once `initialize` has returned, a solver is shared across concurrent
/// requests through `&self` and must not hold mutable state.
///
/// # Retries
///
/// Solvers make a single attempt per call and return the failure. The
/// caller (cert-manager) owns retry policy.
#[async_trait]
pub trait Solver: Send + Sync {
    /// Name used to route challenges to this solver
    ///
    /// This is the resource name cert-manager addresses in
    /// `POST /apis/<group>/v1alpha1/<name>`.
    fn name(&self) -> &'static str;

    /// Prepare the solver with credentials for the surrounding cluster
    ///
    /// Called once before the server accepts requests.
    async fn initialize(&mut self, cluster: kube::Config) -> Result<(), crate::Error>;

    /// Publish the challenge record described by `request`
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The provider accepted the change
    /// - `Err(Error)`: Config decoding, transport or provider failure
    async fn present(&self, request: &ChallengeRequest) -> Result<(), crate::Error>;

    /// Remove the challenge record described by `request`
    async fn cleanup(&self, request: &ChallengeRequest) -> Result<(), crate::Error>;
}
