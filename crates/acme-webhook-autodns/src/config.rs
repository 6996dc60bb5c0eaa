//! Per-challenge solver configuration
//!
//! Issuers pass this object as the webhook `config`:
//!
//! ```yaml
//! webhook:
//!   groupName: acme.example.com
//!   solverName: autoDNS
//!   config:
//!     zone: example.com          # optional, defaults to the resolved zone
//!     nameserver: a.ns14.net
//!     context: "4"
//!     username: api-user
//!     password: api-password
//!     url: https://api.autodns.com/v1
//! ```

use acme_webhook_core::{Error, Result};
use serde::Deserialize;

/// AutoDNS endpoint and credentials for one challenge
///
/// Every key is optional; missing keys decode to empty strings.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AutoDnsConfig {
    /// Zone to patch; empty means "use the challenge's resolved zone"
    pub zone: String,

    /// Primary name server of the zone
    #[serde(rename = "nameserver")]
    pub name_server: String,

    /// Domainrobot context (`X-Domainrobot-Context`)
    pub context: String,

    /// API user
    pub username: String,

    /// API password
    /// ⚠️ NEVER log this value
    pub password: String,

    /// API base URL, e.g. `https://api.autodns.com/v1`
    #[serde(rename = "url")]
    pub base_url: String,
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for AutoDnsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoDnsConfig")
            .field("zone", &self.zone)
            .field("name_server", &self.name_server)
            .field("context", &self.context)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AutoDnsConfig {
    /// Decode the opaque challenge config
    ///
    /// An absent or `null` config yields the zero-value config. Anything
    /// else must decode as an object of the expected shape.
    pub fn decode(raw: Option<&serde_json::Value>) -> Result<Self> {
        match raw {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value @ serde_json::Value::Object(_)) => {
                Self::deserialize(value).map_err(|e| Error::config_decode(e.to_string()))
            }
            // Struct decoding would otherwise accept a sequence by position
            Some(_) => Err(Error::config_decode("invalid type: expected a map")),
        }
    }

    /// Fill in the zone from the challenge when the config leaves it empty
    pub fn with_default_zone(mut self, resolved_zone: &str) -> Self {
        if self.zone.is_empty() {
            self.zone = resolved_zone.to_string();
        }
        self
    }

    /// `{url}/zone/{zone}/{nameserver}`
    pub fn zone_url(&self) -> String {
        format!("{}/zone/{}/{}", self.base_url, self.zone, self.name_server)
    }
}
