use std::net::IpAddr;

use chrono::NaiveDateTime;

use crate::domain::banner::Banner;
use crate::domain::post::Post;
use crate::domain::settings::AppSettings;
use crate::listing::Entity;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use memory::InMemoryRepository;

/// Read access to one admin collection, in collection order.
pub trait EntityReader<T: Entity> {
    fn list_entities(&self) -> RepositoryResult<Vec<T>>;
    fn get_entity(&self, id: i32) -> RepositoryResult<Option<T>>;
}

/// In-place mutation of one admin collection.
pub trait EntityWriter<T: Entity> {
    /// Appends the entity with a freshly assigned id and returns it.
    fn insert_entity(&self, entity: T) -> RepositoryResult<T>;
    /// Replaces the entity with the same id; `NotFound` when absent.
    fn update_entity(&self, entity: T) -> RepositoryResult<T>;
    fn delete_entity(&self, id: i32) -> RepositoryResult<()>;
}

/// Data shown on the public marketing pages.
pub trait PublicContentReader {
    /// Banners visible at `now`, ordered by position.
    fn list_active_banners(&self, now: NaiveDateTime) -> RepositoryResult<Vec<Banner>>;
    /// Published posts, newest first.
    fn list_published_posts(&self) -> RepositoryResult<Vec<Post>>;
}

pub trait BlacklistReader {
    /// Whether an unexpired block exists for `ip`.
    fn is_ip_blocked(&self, ip: IpAddr, now: NaiveDateTime) -> RepositoryResult<bool>;
}

pub trait SettingsRepository {
    fn get_settings(&self) -> RepositoryResult<AppSettings>;
    fn save_settings(&self, settings: &AppSettings) -> RepositoryResult<AppSettings>;
}
