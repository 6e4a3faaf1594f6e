use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::contact::{Contact, ContactStatus};
use crate::domain::settings::AppSettings;

/// Site-wide data rendered in the public header and footer.
#[derive(Debug, Serialize, PartialEq)]
pub struct SiteData {
    pub site_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub social_links: BTreeMap<String, String>,
    pub maintenance_mode: bool,
}

impl From<AppSettings> for SiteData {
    fn from(settings: AppSettings) -> Self {
        Self {
            site_name: settings.site_name,
            contact_email: settings.contact_email,
            contact_phone: settings.contact_phone,
            address: settings.address,
            social_links: settings.social_links,
            maintenance_mode: settings.maintenance_mode,
        }
    }
}

/// Acknowledgement returned after a contact form submission.
#[derive(Debug, Serialize, PartialEq)]
pub struct ContactReceipt {
    pub id: i32,
    pub status: ContactStatus,
}

impl From<&Contact> for ContactReceipt {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            status: contact.status,
        }
    }
}
