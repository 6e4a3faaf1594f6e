use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::listing::{Entity, FieldValue, Listable};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
    pub created_at: NaiveDateTime,
}

impl Role {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|granted| granted.eq_ignore_ascii_case(permission.trim()))
    }
}

impl Listable for Role {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Integer(self.id.into()),
            "name" => FieldValue::text(&self.name),
            "description" => FieldValue::text(&self.description),
            "permissions" => FieldValue::Text(self.permissions.join(", ").into()),
            "permission_count" => FieldValue::Integer(self.permissions.len() as i64),
            "created_at" => FieldValue::Timestamp(self.created_at),
            _ => FieldValue::Empty,
        }
    }
}

impl Entity for Role {
    const KIND: &'static str = "roles";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}
