use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::contact::{Contact, ContactStatus};
use crate::domain::types::EmailAddress;
use crate::forms::{FormError, optional_trimmed};

/// Public contact form submission.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

impl ContactForm {
    /// Validates the submission and builds a pending contact.
    pub fn into_contact(
        self,
        ip_address: Option<String>,
        now: NaiveDateTime,
    ) -> Result<Contact, FormError> {
        self.validate()?;
        let email = EmailAddress::new(self.email).map_err(|_| FormError::InvalidEmail)?;

        Ok(Contact {
            id: 0,
            name: self.name.trim().to_string(),
            email: email.into_inner(),
            phone: optional_trimmed(self.phone),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            status: ContactStatus::Pending,
            ip_address,
            created_at: now,
        })
    }
}

/// Status change of a contact from the admin table.
#[derive(Debug, Deserialize)]
pub struct ContactStatusForm {
    pub status: String,
}

impl TryFrom<ContactStatusForm> for ContactStatus {
    type Error = FormError;

    fn try_from(form: ContactStatusForm) -> Result<Self, Self::Error> {
        ContactStatus::try_from(form.status.as_str()).map_err(FormError::InvalidStatus)
    }
}
