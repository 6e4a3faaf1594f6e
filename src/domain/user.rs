use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::listing::{Entity, FieldValue, Listable};

/// Administrative account of the panel.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// Name of the assigned [`crate::domain::role::Role`].
    pub role: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

impl Listable for User {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Integer(self.id.into()),
            "username" => FieldValue::text(&self.username),
            "email" => FieldValue::text(&self.email),
            "full_name" => FieldValue::text(&self.full_name),
            "role" => FieldValue::text(&self.role),
            "is_active" => FieldValue::Boolean(self.is_active),
            "created_at" => FieldValue::Timestamp(self.created_at),
            "last_login" => FieldValue::optional_timestamp(self.last_login),
            _ => FieldValue::Empty,
        }
    }
}

impl Entity for User {
    const KIND: &'static str = "users";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}
