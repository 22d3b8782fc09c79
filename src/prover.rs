//! Prover descriptors and group-key resolution
//!
//! Benchmark records carry the prover configuration as an externally tagged
//! union, e.g. `{"Direct":{}}`, `{"Proxy":{"proxy":{"host":...}}}` or
//! `{"TlsSingleShot":{"notary":{"domain":...,"network_optimization":...}}}`.
//! The descriptor is decoded once into [`ProverDescriptor`] and every later
//! stage works with the typed value.
//!
//! Group keys are deterministic for identical input, so results from
//! independently produced files merge by simply ingesting them together.

use crate::record::RecordError;
use serde_json::{Map, Value};

/// Tags with dedicated handling, in resolution precedence order
const RECOGNIZED_TAGS: [&str; 4] = ["Direct", "Proxy", "TlsSingleShot", "TlsPerMessage"];

/// Notary settings relevant for grouping TLS provers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotarySettings {
    pub domain: Option<String>,
    pub network_optimization: Option<String>,
}

/// Typed prover configuration, one variant per recognized tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProverDescriptor {
    /// Direct passthrough, no proving
    Direct,
    /// Forwarding proxy; `host` is empty when the record omits it
    Proxy { host: String },
    /// Single TLS session, proof at the end
    TlsSingleShot(NotarySettings),
    /// Fresh TLS session and proof per message
    TlsPerMessage(NotarySettings),
    /// Unrecognized tag, kept verbatim for forward compatibility
    Other(String),
}

/// Grouping attributes derived from a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProver {
    /// Base label ("Direct", "Proxy-TEE", "TlsSingleShot", ...)
    pub base: String,
    /// Notary domain or proxy host
    pub peer_domain: Option<String>,
    /// Network optimization mode ("Bandwidth", "Latency", ...)
    pub network_optimization: Option<String>,
}

impl ProverDescriptor {
    /// Decode the `prover` field of a raw record
    ///
    /// A recognized tag wins over any other key present. An object whose
    /// keys are all unrecognized must have exactly one key.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let Value::Object(map) = value else {
            return Err(invalid("prover descriptor must be a JSON object"));
        };

        if map.contains_key("Direct") {
            return Ok(Self::Direct);
        }
        if let Some(payload) = map.get("Proxy") {
            return Ok(Self::Proxy {
                host: proxy_host(payload)?,
            });
        }
        if let Some(payload) = map.get("TlsSingleShot") {
            return Ok(Self::TlsSingleShot(notary_settings("TlsSingleShot", payload)?));
        }
        if let Some(payload) = map.get("TlsPerMessage") {
            return Ok(Self::TlsPerMessage(notary_settings("TlsPerMessage", payload)?));
        }

        let mut keys = map.keys();
        match (keys.next(), keys.next()) {
            (Some(tag), None) => Ok(Self::Other(tag.clone())),
            (None, _) => Err(invalid("prover descriptor has no variant tag")),
            (Some(_), Some(_)) => Err(invalid(&format!(
                "prover descriptor has several unrecognized tags ({}); expected one of {}",
                map.keys().cloned().collect::<Vec<_>>().join(", "),
                RECOGNIZED_TAGS.join(", ")
            ))),
        }
    }

    /// Variant tag as it appears on the wire
    pub fn tag(&self) -> &str {
        match self {
            Self::Direct => "Direct",
            Self::Proxy { .. } => "Proxy",
            Self::TlsSingleShot(_) => "TlsSingleShot",
            Self::TlsPerMessage(_) => "TlsPerMessage",
            Self::Other(tag) => tag,
        }
    }

    /// Derive base label and sub-attributes
    pub fn resolve(&self) -> ResolvedProver {
        match self {
            Self::Direct => ResolvedProver {
                base: "Direct".to_string(),
                peer_domain: None,
                network_optimization: None,
            },
            Self::Proxy { host } => {
                let base = if host.to_lowercase().contains("tee") {
                    "Proxy-TEE"
                } else {
                    "Proxy"
                };
                ResolvedProver {
                    base: base.to_string(),
                    peer_domain: non_empty(Some(host)),
                    network_optimization: None,
                }
            }
            Self::TlsSingleShot(notary) | Self::TlsPerMessage(notary) => ResolvedProver {
                base: self.tag().to_string(),
                peer_domain: non_empty(notary.domain.as_ref()),
                network_optimization: non_empty(notary.network_optimization.as_ref()),
            },
            Self::Other(tag) => ResolvedProver {
                base: tag.clone(),
                peer_domain: None,
                network_optimization: None,
            },
        }
    }

    /// Group key for this descriptor
    pub fn group_key(&self) -> String {
        self.resolve().group_key()
    }
}

impl ResolvedProver {
    /// Build the display key: `Base`, `Base (peer)`, `Base (peer) [opt]` or `Base [opt]`
    pub fn group_key(&self) -> String {
        let mut key = self.base.clone();
        if let Some(domain) = &self.peer_domain {
            key.push_str(&format!(" ({})", short_domain(domain)));
        }
        if let Some(optimization) = &self.network_optimization {
            key.push_str(&format!(" [{}]", optimization));
        }
        key
    }
}

/// Label before the first '.', or the whole domain when it has none
pub fn short_domain(domain: &str) -> &str {
    domain.split('.').next().unwrap_or(domain)
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

fn invalid(message: &str) -> RecordError {
    RecordError::InvalidProver(message.to_string())
}

/// Proxy payloads are either `{"proxy": {...}}` or the proxy settings inline
fn proxy_host(payload: &Value) -> Result<String, RecordError> {
    let Value::Object(wrapper) = payload else {
        return Err(invalid("Proxy payload must be a JSON object"));
    };
    let settings = match wrapper.get("proxy") {
        Some(Value::Object(inner)) => inner,
        Some(_) => return Err(invalid("Proxy.proxy must be a JSON object")),
        None => wrapper,
    };
    match settings.get("host") {
        None => Ok(String::new()),
        Some(Value::String(host)) => Ok(host.clone()),
        Some(other) => Err(invalid(&format!("Proxy host must be a string, got {}", other))),
    }
}

fn notary_settings(tag: &str, payload: &Value) -> Result<NotarySettings, RecordError> {
    let notary = payload
        .get("notary")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid(&format!("{} payload requires a `notary` object", tag)))?;

    Ok(NotarySettings {
        domain: optional_string(tag, notary, "domain")?,
        network_optimization: optional_string(tag, notary, "network_optimization")?,
    })
}

fn optional_string(
    tag: &str,
    notary: &Map<String, Value>,
    field: &str,
) -> Result<Option<String>, RecordError> {
    match notary.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(invalid(&format!(
            "{}.notary.{} must be a string, got {}",
            tag, field, other
        ))),
    }
}
