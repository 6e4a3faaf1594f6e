use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::listing::{Entity, FieldValue, Listable};

/// Message submitted through the public contact form.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub ip_address: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Spam,
}

impl ContactStatus {
    /// Rank used when sorting the contacts table by status.
    pub const PRIORITY: &'static [(&'static str, i64)] = &[
        ("pending", 1),
        ("in_progress", 2),
        ("completed", 3),
        ("spam", 4),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::InProgress => "in_progress",
            ContactStatus::Completed => "completed",
            ContactStatus::Spam => "spam",
        }
    }
}

impl Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ContactStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "pending" => Ok(ContactStatus::Pending),
            "in_progress" => Ok(ContactStatus::InProgress),
            "completed" => Ok(ContactStatus::Completed),
            "spam" => Ok(ContactStatus::Spam),
            other => Err(format!("unknown contact status `{other}`")),
        }
    }
}

impl Listable for Contact {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Integer(self.id.into()),
            "name" => FieldValue::text(&self.name),
            "email" => FieldValue::text(&self.email),
            "phone" => FieldValue::optional_text(self.phone.as_deref()),
            "subject" => FieldValue::text(&self.subject),
            "message" => FieldValue::text(&self.message),
            "status" => FieldValue::text(self.status.as_str()),
            "ip_address" => FieldValue::optional_text(self.ip_address.as_deref()),
            "created_at" => FieldValue::Timestamp(self.created_at),
            _ => FieldValue::Empty,
        }
    }
}

impl Entity for Contact {
    const KIND: &'static str = "contacts";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}
