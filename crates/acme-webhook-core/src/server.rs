//! HTTP surface of the webhook
//!
//! cert-manager reaches a webhook solver through the Kubernetes API
//! aggregation layer. The routes mirror what that layer forwards:
//!
//! - `POST /apis/{group}/v1alpha1/{solver}`: challenge dispatch
//! - `GET /apis/{group}/v1alpha1`: API discovery
//! - `GET /healthz`: liveness
//!
//! Solver failures are not HTTP failures: the response is a 200 carrying a
//! `ChallengePayload` whose `response.success` is false. Only malformed
//! envelopes and unknown routes map to 4xx.

use std::future::Future;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIResource, APIResourceList};
use tracing::{error, info};

use crate::challenge::{
    CHALLENGE_KIND, ChallengeAction, ChallengePayload, ChallengeRequest, ChallengeResponse,
    failure_status,
};
use crate::config::WebhookConfig;
use crate::error::{Error, Result};
use crate::registry::SolverRegistry;

/// Version segment of every solver route
pub const API_VERSION: &str = "v1alpha1";

/// Shared router state
#[derive(Clone)]
pub struct ServerState {
    group_name: Arc<str>,
    registry: Arc<SolverRegistry>,
}

impl ServerState {
    /// Create state serving `registry` under `group_name`
    pub fn new(group_name: impl Into<String>, registry: Arc<SolverRegistry>) -> Self {
        Self {
            group_name: Arc::from(group_name.into()),
            registry,
        }
    }
}

/// Build the webhook router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/apis/{group}/v1alpha1", get(discovery))
        .route("/apis/{group}/v1alpha1/{solver}", post(solve))
        .with_state(state)
}

/// Bind `config.listen_addr` and serve until `shutdown` resolves
pub async fn serve<F>(
    config: &WebhookConfig,
    registry: Arc<SolverRegistry>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind {}: {}", config.listen_addr, e)))?;

    info!(
        "Serving solvers {:?} under /apis/{}/{} on {}",
        registry.list_solvers(),
        config.group_name,
        API_VERSION,
        config.listen_addr
    );

    let app = router(ServerState::new(config.group_name.clone(), registry));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Other(format!("Server error: {}", e)))
}

/// Run one challenge against the named solver
///
/// Never fails: solver errors are folded into the returned response.
pub async fn dispatch(
    registry: &SolverRegistry,
    solver_name: &str,
    request: &ChallengeRequest,
) -> ChallengeResponse {
    let solver = match registry.get(solver_name) {
        Ok(solver) => solver,
        Err(e) => return ChallengeResponse::failure(&request.uid, e.to_string()),
    };

    info!(
        uid = %request.uid,
        action = %request.action,
        solver = solver_name,
        fqdn = %request.resolved_fqdn,
        "Handling challenge"
    );

    let result = match request.action {
        ChallengeAction::Present => solver.present(request).await,
        ChallengeAction::CleanUp => solver.cleanup(request).await,
    };

    match result {
        Ok(()) => {
            info!(uid = %request.uid, action = %request.action, "Challenge handled");
            ChallengeResponse::success(&request.uid)
        }
        Err(e) => {
            error!(uid = %request.uid, action = %request.action, "Challenge failed: {}", e);
            ChallengeResponse::failure(&request.uid, e.to_string())
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

async fn discovery(State(state): State<ServerState>, Path(group): Path<String>) -> Response {
    if group != *state.group_name {
        return not_found(format!("API group {} is not served", group));
    }

    let resources = state
        .registry
        .list_solvers()
        .into_iter()
        .map(|name| APIResource {
            singular_name: name.clone(),
            name,
            namespaced: false,
            kind: CHALLENGE_KIND.to_string(),
            verbs: vec!["create".to_string()],
            ..Default::default()
        })
        .collect();

    Json(APIResourceList {
        group_version: format!("{}/{}", group, API_VERSION),
        resources,
    })
    .into_response()
}

async fn solve(
    State(state): State<ServerState>,
    Path((group, solver)): Path<(String, String)>,
    Json(payload): Json<ChallengePayload>,
) -> Response {
    if group != *state.group_name {
        return not_found(format!("API group {} is not served", group));
    }

    if !state.registry.has_solver(&solver) {
        return not_found(Error::unknown_solver(&solver).to_string());
    }

    let Some(request) = payload.request.clone() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(failure_status("ChallengePayload has no request", "BadRequest", 400)),
        )
            .into_response();
    };

    let response = dispatch(&state.registry, &solver, &request).await;
    Json(payload.with_response(response)).into_response()
}

fn not_found(message: String) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(failure_status(message, "NotFound", 404)),
    )
        .into_response()
}
