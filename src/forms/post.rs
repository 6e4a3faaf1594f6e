use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::post::{Post, PostStatus};
use crate::domain::types::Slug;
use crate::forms::{FormError, optional_trimmed};

#[derive(Debug, Deserialize, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Derived from the title when blank.
    pub slug: Option<String>,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub excerpt: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1, max = 100))]
    pub author: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub status: String,
    #[validate(url)]
    pub image_url: Option<String>,
}

impl PostForm {
    pub fn into_post(self, now: NaiveDateTime) -> Result<Post, FormError> {
        self.validate()?;
        let status = PostStatus::try_from(self.status.as_str()).map_err(FormError::InvalidStatus)?;
        let slug = match optional_trimmed(self.slug) {
            Some(slug) => Slug::new(slug),
            None => Slug::from_title(&self.title),
        }
        .map_err(|_| FormError::InvalidSlug)?;

        Ok(Post {
            id: 0,
            title: self.title.trim().to_string(),
            slug: slug.into_inner(),
            excerpt: self.excerpt.trim().to_string(),
            content: self.content,
            author: self.author.trim().to_string(),
            category: self.category.trim().to_string(),
            status,
            image_url: optional_trimmed(self.image_url),
            created_at: now,
            published_at: (status == PostStatus::Published).then_some(now),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn form() -> PostForm {
        PostForm {
            title: "Launching Our New Services".to_string(),
            slug: None,
            excerpt: "Short intro".to_string(),
            content: "Body".to_string(),
            author: "editor".to_string(),
            category: "news".to_string(),
            status: "published".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn derives_slug_and_publication_date() {
        let now = Utc::now().naive_utc();
        let post = form().into_post(now).unwrap();

        assert_eq!(post.slug, "launching-our-new-services");
        assert_eq!(post.published_at, Some(now));
    }

    #[test]
    fn drafts_are_not_published() {
        let mut form = form();
        form.status = "draft".to_string();
        form.slug = Some("custom-slug".to_string());

        let post = form.into_post(Utc::now().naive_utc()).unwrap();

        assert_eq!(post.slug, "custom-slug");
        assert_eq!(post.published_at, None);
    }

    #[test]
    fn rejects_bad_slug_and_status() {
        let mut bad_slug = form();
        bad_slug.slug = Some("Not A Slug".to_string());
        assert!(matches!(
            bad_slug.into_post(Utc::now().naive_utc()),
            Err(FormError::InvalidSlug)
        ));

        let mut bad_status = form();
        bad_status.status = "live".to_string();
        assert!(matches!(
            bad_status.into_post(Utc::now().naive_utc()),
            Err(FormError::InvalidStatus(_))
        ));
    }
}
