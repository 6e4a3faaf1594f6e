use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::listing::{Entity, FieldValue, Listable};

/// IP address barred from submitting public forms.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BlockedIp {
    pub id: i32,
    pub ip_address: String,
    pub reason: String,
    pub blocked_by: String,
    pub created_at: NaiveDateTime,
    /// `None` blocks permanently.
    pub expires_at: Option<NaiveDateTime>,
}

impl BlockedIp {
    pub fn is_permanent(&self) -> bool {
        self.expires_at.is_none()
    }

    /// Whether the block still applies at `now`.
    pub fn is_active_at(&self, now: NaiveDateTime) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }
}

impl Listable for BlockedIp {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Integer(self.id.into()),
            "ip_address" => FieldValue::text(&self.ip_address),
            "reason" => FieldValue::text(&self.reason),
            "blocked_by" => FieldValue::text(&self.blocked_by),
            "created_at" => FieldValue::Timestamp(self.created_at),
            "expires_at" => FieldValue::optional_timestamp(self.expires_at),
            _ => FieldValue::Empty,
        }
    }
}

impl Entity for BlockedIp {
    const KIND: &'static str = "blacklist";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    /// An address may hold one block that is active when the new one starts.
    fn conflict_with(&self, other: &Self) -> Option<String> {
        (self.ip_address.trim() == other.ip_address.trim() && other.is_active_at(self.created_at))
            .then(|| format!("{} is already blocked", self.ip_address.trim()))
    }
}
