// # AutoDNS Solver
//
// DNS-01 challenge solver backed by the AutoDNS (InterNetX Domainrobot) JSON
// API.
//
// ## Behavior
//
// - ✅ One PATCH request per challenge
// - ✅ Full error propagation to the caller (cert-manager owns retries)
// - ✅ Zone defaults to the challenge's resolved zone
// - ❌ NO retry or backoff logic
// - ❌ NO timeout override
// - ❌ NO state kept between calls
//
// ## Security Requirements
//
// - The API password NEVER appears in logs or Debug output
//
// ## API Reference
//
// - Patch zone: PATCH `/zone/:origin/:nameserver`
// - Headers: `X-Domainrobot-Context: <context>`, Basic auth

pub mod config;
pub mod record;

use acme_webhook_core::{ChallengeRequest, Error, Result, Solver, SolverRegistry};
use async_trait::async_trait;
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

pub use config::AutoDnsConfig;
pub use record::{RecordChangeDocument, ResourceRecord};

/// Name the solver is registered and addressed under
pub const SOLVER_NAME: &str = "autoDNS";

/// Tenant header required by the Domainrobot API
pub const CONTEXT_HEADER: &str = "X-Domainrobot-Context";

/// AutoDNS DNS-01 solver
///
/// Holds nothing but the cluster client set by `initialize`, which no
/// challenge path reads.
#[derive(Default)]
pub struct AutoDnsSolver {
    cluster_client: Option<kube::Client>,
}

impl std::fmt::Debug for AutoDnsSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoDnsSolver")
            .field("initialized", &self.cluster_client.is_some())
            .finish()
    }
}

impl AutoDnsSolver {
    /// Create an uninitialized solver
    pub fn new() -> Self {
        Self::default()
    }

    /// Cluster client set by `initialize`
    pub fn cluster_client(&self) -> Option<&kube::Client> {
        self.cluster_client.as_ref()
    }

    /// Apply `document` to the zone described by `config`
    ///
    /// Makes exactly one request. The connection belongs to a client built
    /// for this call and is released when it returns.
    ///
    /// # API Call
    ///
    /// ```http
    /// PATCH {url}/zone/{zone}/{nameserver}
    /// Content-Type: application/json
    /// X-Domainrobot-Context: {context}
    /// Authorization: Basic <username:password>
    /// ```
    async fn call_api(
        &self,
        method: Method,
        document: &RecordChangeDocument,
        config: &AutoDnsConfig,
    ) -> Result<()> {
        let url = config.zone_url();
        let body = serde_json::to_vec(document)?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::request_construction(e.to_string()))?;

        tracing::debug!("{} {} (context: {})", method, url, config.context);

        let response = client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTEXT_HEADER, &config.context)
            .basic_auth(&config.username, Some(&config.password))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("{} {}: {}", method, url, e);
                if e.is_builder() {
                    Error::request_construction(msg)
                } else {
                    Error::transport(msg)
                }
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let err = Error::provider_api(status.to_string(), url, method.as_str());
        tracing::error!("{}", err);
        Err(err)
    }

    fn prepare(request: &ChallengeRequest) -> Result<(AutoDnsConfig, ResourceRecord)> {
        let config =
            AutoDnsConfig::decode(request.config.as_ref())?.with_default_zone(&request.resolved_zone);
        let record = ResourceRecord::txt(&request.resolved_fqdn, &request.key);
        Ok((config, record))
    }
}

#[async_trait]
impl Solver for AutoDnsSolver {
    fn name(&self) -> &'static str {
        SOLVER_NAME
    }

    async fn initialize(&mut self, cluster: kube::Config) -> Result<()> {
        let client = kube::Client::try_from(cluster)
            .map_err(|e| Error::cluster(format!("Failed to create Kubernetes client: {}", e)))?;
        self.cluster_client = Some(client);
        tracing::debug!("AutoDNS solver initialized");
        Ok(())
    }

    async fn present(&self, request: &ChallengeRequest) -> Result<()> {
        let (config, record) = Self::prepare(request)?;

        tracing::info!(
            "Adding TXT record {} to zone {} (name server: {})",
            record.name,
            config.zone,
            config.name_server
        );

        let document = RecordChangeDocument::add(&request.resolved_zone, record);
        self.call_api(Method::PATCH, &document, &config).await
    }

    async fn cleanup(&self, request: &ChallengeRequest) -> Result<()> {
        let (config, record) = Self::prepare(request)?;

        tracing::info!(
            "Removing TXT record {} from zone {} (name server: {})",
            record.name,
            config.zone,
            config.name_server
        );

        let document = RecordChangeDocument::remove(&request.resolved_zone, record);
        self.call_api(Method::PATCH, &document, &config).await
    }
}

/// Register the AutoDNS solver with a registry
///
/// # Example
///
/// ```rust
/// use acme_webhook_core::SolverRegistry;
///
/// let mut registry = SolverRegistry::new();
/// acme_webhook_autodns::register(&mut registry);
/// assert!(registry.has_solver("autoDNS"));
/// ```
pub fn register(registry: &mut SolverRegistry) {
    registry.register(Box::new(AutoDnsSolver::new()));
}
