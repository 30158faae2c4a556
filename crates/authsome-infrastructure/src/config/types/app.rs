//! Main application configuration

use super::{LoggingConfig, SecurityConfig};
use authsome_domain::{Identity, Settings};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Guest account served when nobody is logged in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestConfig {
    /// Whether `"guest"` credentials authenticate at all
    pub enabled: bool,

    /// Fields of the guest identity, nested under the model name
    pub fields: BTreeMap<String, Value>,
}

impl Default for GuestConfig {
    fn default() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("id".to_string(), json!(0));
        fields.insert("guest".to_string(), json!(true));
        Self {
            enabled: true,
            fields,
        }
    }
}

impl GuestConfig {
    /// The guest identity for `model`, if enabled
    pub fn identity(&self, model: &str) -> Option<Identity> {
        if !self.enabled {
            return None;
        }
        let fields: Map<String, Value> = self
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let mut identity = Identity::new();
        identity.insert(model, Value::Object(fields));
        Some(identity)
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Identity resolution settings
    pub auth: Settings,

    /// Guest fallback account
    pub guest: GuestConfig,

    /// Hashing and cookie encryption
    pub security: SecurityConfig,

    /// Logging
    pub logging: LoggingConfig,
}
