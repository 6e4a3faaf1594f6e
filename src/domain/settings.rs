use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Site-wide settings edited from the admin panel.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub site_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    /// Network name to profile URL, e.g. `"linkedin"`.
    pub social_links: BTreeMap<String, String>,
    pub maintenance_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            site_name: "Marketing Site".to_string(),
            contact_email: "info@example.com".to_string(),
            contact_phone: None,
            address: None,
            social_links: BTreeMap::new(),
            maintenance_mode: false,
        }
    }
}
