use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::listing::{Entity, FieldValue, Listable};

/// Hero/slider banner shown on the public home page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Banner {
    pub id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    /// Display order on the public page, lowest first.
    pub position: i32,
    pub is_active: bool,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl Banner {
    /// Active and, when scheduled, inside its display window.
    pub fn is_visible_at(&self, now: NaiveDateTime) -> bool {
        self.is_active
            && self.starts_at.is_none_or(|start| start <= now)
            && self.ends_at.is_none_or(|end| now <= end)
    }
}

impl Listable for Banner {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Integer(self.id.into()),
            "title" => FieldValue::text(&self.title),
            "subtitle" => FieldValue::optional_text(self.subtitle.as_deref()),
            "image_url" => FieldValue::text(&self.image_url),
            "link_url" => FieldValue::optional_text(self.link_url.as_deref()),
            "position" => FieldValue::Integer(self.position.into()),
            "is_active" => FieldValue::Boolean(self.is_active),
            "starts_at" => FieldValue::optional_timestamp(self.starts_at),
            "ends_at" => FieldValue::optional_timestamp(self.ends_at),
            "created_at" => FieldValue::Timestamp(self.created_at),
            _ => FieldValue::Empty,
        }
    }
}

impl Entity for Banner {
    const KIND: &'static str = "banners";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}
