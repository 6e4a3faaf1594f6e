use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::listing::{Entity, FieldValue, Listable};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub status: PostStatus,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub published_at: Option<NaiveDateTime>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }
}

impl Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for PostStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            other => Err(format!("unknown post status `{other}`")),
        }
    }
}

impl Listable for Post {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Integer(self.id.into()),
            "title" => FieldValue::text(&self.title),
            "slug" => FieldValue::text(&self.slug),
            "excerpt" => FieldValue::text(&self.excerpt),
            "content" => FieldValue::text(&self.content),
            "author" => FieldValue::text(&self.author),
            "category" => FieldValue::text(&self.category),
            "status" => FieldValue::text(self.status.as_str()),
            "created_at" => FieldValue::Timestamp(self.created_at),
            "published_at" => FieldValue::optional_timestamp(self.published_at),
            _ => FieldValue::Empty,
        }
    }
}

impl Entity for Post {
    const KIND: &'static str = "posts";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn conflict_with(&self, other: &Self) -> Option<String> {
        (self.slug == other.slug).then(|| format!("slug `{}` is already taken", self.slug))
    }
}
