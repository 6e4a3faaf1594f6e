use std::collections::BTreeMap;

use serde::Deserialize;
use validator::{Validate, ValidateUrl};

use crate::domain::settings::AppSettings;
use crate::domain::types::EmailAddress;
use crate::forms::{FormError, optional_trimmed};

#[derive(Debug, Deserialize, Validate)]
pub struct SettingsForm {
    #[validate(length(min = 1, max = 100))]
    pub site_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub social_links: BTreeMap<String, String>,
    #[serde(default)]
    pub maintenance_mode: bool,
}

impl TryFrom<SettingsForm> for AppSettings {
    type Error = FormError;

    fn try_from(form: SettingsForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let contact_email =
            EmailAddress::new(form.contact_email).map_err(|_| FormError::InvalidEmail)?;
        let mut social_links = BTreeMap::new();
        for (network, url) in form.social_links {
            let url = url.trim().to_string();
            if url.is_empty() {
                continue;
            }
            if !url.validate_url() {
                return Err(FormError::InvalidUrl);
            }
            social_links.insert(network.trim().to_lowercase(), url);
        }

        Ok(AppSettings {
            site_name: form.site_name.trim().to_string(),
            contact_email: contact_email.into_inner(),
            contact_phone: optional_trimmed(form.contact_phone),
            address: optional_trimmed(form.address),
            social_links,
            maintenance_mode: form.maintenance_mode,
        })
    }
}
