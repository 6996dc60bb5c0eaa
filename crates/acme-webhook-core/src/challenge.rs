//! Challenge wire types
//!
//! cert-manager talks to a webhook solver by POSTing a `ChallengePayload`
//! with `request` set and expects the same envelope back with `response`
//! set. Field names follow the `webhook.acme.cert-manager.io/v1alpha1` JSON.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Status;
use serde::{Deserialize, Serialize};

/// API group/version of the challenge envelope
pub const CHALLENGE_API_VERSION: &str = "webhook.acme.cert-manager.io/v1alpha1";

/// Kind of the challenge envelope
pub const CHALLENGE_KIND: &str = "ChallengePayload";

/// Action requested by cert-manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeAction {
    /// Publish the challenge record
    Present,
    /// Remove the challenge record
    CleanUp,
}

impl std::fmt::Display for ChallengeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChallengeAction::Present => write!(f, "Present"),
            ChallengeAction::CleanUp => write!(f, "CleanUp"),
        }
    }
}

/// A single DNS-01 challenge as seen by a solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Identifier echoed back in the response
    #[serde(default)]
    pub uid: String,

    /// Whether to publish or remove the record
    pub action: ChallengeAction,

    /// Challenge type (always "dns-01" for webhook solvers)
    #[serde(rename = "type", default)]
    pub challenge_type: String,

    /// Domain name being validated
    #[serde(default)]
    pub dns_name: String,

    /// Value to publish in the TXT record
    #[serde(default)]
    pub key: String,

    /// Namespace of the issuing resource
    #[serde(default)]
    pub resource_namespace: String,

    /// Fully qualified name the TXT record lives under
    #[serde(rename = "resolvedFQDN", default)]
    pub resolved_fqdn: String,

    /// Zone the TXT record lives in
    #[serde(default)]
    pub resolved_zone: String,

    /// Whether ambient credentials may be used
    #[serde(default)]
    pub allow_ambient_credentials: bool,

    /// Solver-specific configuration, opaque to the webhook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl ChallengeRequest {
    /// Build a request with the fields every solver reads
    pub fn new(
        action: ChallengeAction,
        resolved_zone: impl Into<String>,
        resolved_fqdn: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            uid: String::new(),
            action,
            challenge_type: "dns-01".to_string(),
            dns_name: String::new(),
            key: key.into(),
            resource_namespace: String::new(),
            resolved_fqdn: resolved_fqdn.into(),
            resolved_zone: resolved_zone.into(),
            allow_ambient_credentials: false,
            config: None,
        }
    }

    /// Attach solver config
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }
}

/// Outcome reported back to cert-manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    /// Request identifier
    #[serde(default)]
    pub uid: String,

    /// Whether the solver succeeded
    pub success: bool,

    /// Failure details, absent on success
    #[serde(rename = "status", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Status>,
}

impl ChallengeResponse {
    /// Successful response for `uid`
    pub fn success(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            success: true,
            result: None,
        }
    }

    /// Failed response for `uid` carrying `message`
    pub fn failure(uid: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            success: false,
            result: Some(failure_status(message, "InternalError", 500)),
        }
    }

    /// Failure message, if any
    pub fn message(&self) -> Option<&str> {
        self.result.as_ref().and_then(|s| s.message.as_deref())
    }
}

/// Envelope exchanged with cert-manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengePayload {
    /// Always [`CHALLENGE_API_VERSION`]
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Always [`CHALLENGE_KIND`]
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Incoming challenge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<ChallengeRequest>,

    /// Outgoing result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ChallengeResponse>,
}

impl ChallengePayload {
    /// Envelope carrying a request
    pub fn from_request(request: ChallengeRequest) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            request: Some(request),
            response: None,
        }
    }

    /// Attach a response, keeping the original request
    pub fn with_response(mut self, response: ChallengeResponse) -> Self {
        self.response = Some(response);
        self
    }
}

/// Build a `Failure` status object
pub fn failure_status(message: impl Into<String>, reason: &str, code: i32) -> Status {
    Status {
        status: Some("Failure".to_string()),
        message: Some(message.into()),
        reason: Some(reason.to_string()),
        code: Some(code),
        ..Default::default()
    }
}

fn default_api_version() -> String {
    CHALLENGE_API_VERSION.to_string()
}

fn default_kind() -> String {
    CHALLENGE_KIND.to_string()
}
