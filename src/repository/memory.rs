//! In-memory store holding every admin collection for the lifetime of the
//! process, seeded from a JSON document.

use std::net::IpAddr;
use std::path::Path;
use std::sync::RwLock;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::domain::banner::Banner;
use crate::domain::blacklist::BlockedIp;
use crate::domain::contact::Contact;
use crate::domain::post::{Post, PostStatus};
use crate::domain::role::Role;
use crate::domain::settings::AppSettings;
use crate::domain::user::User;
use crate::listing::Entity;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    BlacklistReader, EntityReader, EntityWriter, PublicContentReader, SettingsRepository,
};

/// Initial contents of the store. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub posts: Vec<Post>,
    pub banners: Vec<Banner>,
    pub contacts: Vec<Contact>,
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub blacklist: Vec<BlockedIp>,
    pub settings: AppSettings,
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    posts: RwLock<Vec<Post>>,
    banners: RwLock<Vec<Banner>>,
    contacts: RwLock<Vec<Contact>>,
    users: RwLock<Vec<User>>,
    roles: RwLock<Vec<Role>>,
    blacklist: RwLock<Vec<BlockedIp>>,
    settings: RwLock<AppSettings>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            posts: RwLock::new(seed.posts),
            banners: RwLock::new(seed.banners),
            contacts: RwLock::new(seed.contacts),
            users: RwLock::new(seed.users),
            roles: RwLock::new(seed.roles),
            blacklist: RwLock::new(seed.blacklist),
            settings: RwLock::new(seed.settings),
        }
    }

    /// Loads a JSON seed document from disk.
    pub fn from_seed_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let seed: SeedData = serde_json::from_str(&raw)?;
        Ok(Self::from_seed(seed))
    }
}

/// Gives generic reader/writer impls access to the collection of `T`.
pub trait HoldsCollection<T> {
    fn collection(&self) -> &RwLock<Vec<T>>;
}

macro_rules! holds_collection {
    ($entity:ty, $field:ident) => {
        impl HoldsCollection<$entity> for InMemoryRepository {
            fn collection(&self) -> &RwLock<Vec<$entity>> {
                &self.$field
            }
        }
    };
}

holds_collection!(Post, posts);
holds_collection!(Banner, banners);
holds_collection!(Contact, contacts);
holds_collection!(User, users);
holds_collection!(Role, roles);
holds_collection!(BlockedIp, blacklist);

fn collection_of<T, R>(repo: &R) -> &RwLock<Vec<T>>
where
    R: HoldsCollection<T>,
{
    <R as HoldsCollection<T>>::collection(repo)
}

impl<T: Entity> EntityReader<T> for InMemoryRepository
where
    InMemoryRepository: HoldsCollection<T>,
{
    fn list_entities(&self) -> RepositoryResult<Vec<T>> {
        Ok(collection_of::<T, _>(self).read()?.clone())
    }

    fn get_entity(&self, id: i32) -> RepositoryResult<Option<T>> {
        let items = collection_of::<T, _>(self).read()?;
        Ok(items.iter().find(|item| item.id() == id).cloned())
    }
}

impl<T: Entity> EntityWriter<T> for InMemoryRepository
where
    InMemoryRepository: HoldsCollection<T>,
{
    fn insert_entity(&self, mut entity: T) -> RepositoryResult<T> {
        let mut items = collection_of::<T, _>(self).write()?;
        if let Some(reason) = items.iter().find_map(|item| entity.conflict_with(item)) {
            return Err(RepositoryError::ConstraintViolation(reason));
        }
        let next_id = items.iter().map(Entity::id).max().unwrap_or(0) + 1;
        entity.set_id(next_id);
        items.push(entity.clone());
        log::info!("Created {} #{next_id}", T::KIND);
        Ok(entity)
    }

    fn update_entity(&self, entity: T) -> RepositoryResult<T> {
        let mut items = collection_of::<T, _>(self).write()?;
        if let Some(reason) = items
            .iter()
            .filter(|item| item.id() != entity.id())
            .find_map(|item| entity.conflict_with(item))
        {
            return Err(RepositoryError::ConstraintViolation(reason));
        }
        let slot = items
            .iter_mut()
            .find(|item| item.id() == entity.id())
            .ok_or(RepositoryError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    fn delete_entity(&self, id: i32) -> RepositoryResult<()> {
        let mut items = collection_of::<T, _>(self).write()?;
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Err(RepositoryError::NotFound);
        }
        log::info!("Deleted {} #{id}", T::KIND);
        Ok(())
    }
}

impl PublicContentReader for InMemoryRepository {
    fn list_active_banners(&self, now: NaiveDateTime) -> RepositoryResult<Vec<Banner>> {
        let mut banners: Vec<Banner> = self
            .banners
            .read()?
            .iter()
            .filter(|banner| banner.is_visible_at(now))
            .cloned()
            .collect();
        banners.sort_by_key(|banner| banner.position);
        Ok(banners)
    }

    fn list_published_posts(&self) -> RepositoryResult<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .posts
            .read()?
            .iter()
            .filter(|post| post.status == PostStatus::Published)
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            let a = a.published_at.unwrap_or(a.created_at);
            let b = b.published_at.unwrap_or(b.created_at);
            b.cmp(&a)
        });
        Ok(posts)
    }
}

impl BlacklistReader for InMemoryRepository {
    fn is_ip_blocked(&self, ip: IpAddr, now: NaiveDateTime) -> RepositoryResult<bool> {
        Ok(self.blacklist.read()?.iter().any(|entry| {
            entry
                .ip_address
                .trim()
                .parse::<IpAddr>()
                .is_ok_and(|blocked| blocked == ip)
                && entry.is_active_at(now)
        }))
    }
}

impl SettingsRepository for InMemoryRepository {
    fn get_settings(&self) -> RepositoryResult<AppSettings> {
        Ok(self.settings.read()?.clone())
    }

    fn save_settings(&self, settings: &AppSettings) -> RepositoryResult<AppSettings> {
        *self.settings.write()? = settings.clone();
        Ok(settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::contact::ContactStatus;

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn contact(name: &str) -> Contact {
        Contact {
            id: 0,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            subject: "Hello".to_string(),
            message: "Please call me".to_string(),
            status: ContactStatus::Pending,
            ip_address: None,
            created_at: ts(1),
        }
    }

    #[test]
    fn insert_update_delete_in_place() {
        let repo = InMemoryRepository::new();

        let alice = repo.insert_entity(contact("Alice")).unwrap();
        let bob = repo.insert_entity(contact("Bob")).unwrap();
        assert_eq!((alice.id, bob.id), (1, 2));

        let mut updated = bob.clone();
        updated.status = ContactStatus::Completed;
        repo.update_entity(updated).unwrap();

        let stored: Option<Contact> = repo.get_entity(2).unwrap();
        assert_eq!(stored.unwrap().status, ContactStatus::Completed);

        EntityWriter::<Contact>::delete_entity(&repo, 1).unwrap();
        let remaining: Vec<Contact> = repo.list_entities().unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(matches!(
            EntityWriter::<Contact>::delete_entity(&repo, 1),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn conflicting_records_are_rejected_under_the_write_lock() {
        let repo = InMemoryRepository::new();
        let block = |ip: &str, day: u32, expires: Option<u32>| BlockedIp {
            id: 0,
            ip_address: ip.to_string(),
            reason: "spam".to_string(),
            blocked_by: "admin".to_string(),
            created_at: ts(day),
            expires_at: expires.map(ts),
        };

        let first = repo.insert_entity(block("10.0.0.1", 1, Some(5))).unwrap();
        assert!(matches!(
            repo.insert_entity(block(" 10.0.0.1", 2, None)),
            Err(RepositoryError::ConstraintViolation(_))
        ));
        repo.insert_entity(block("10.0.0.2", 2, None)).unwrap();
        let renewed = repo.insert_entity(block("10.0.0.1", 6, None)).unwrap();
        assert_eq!((first.id, renewed.id), (1, 3));

        let mut moved = renewed.clone();
        moved.ip_address = "10.0.0.2".to_string();
        assert!(matches!(
            repo.update_entity(moved),
            Err(RepositoryError::ConstraintViolation(_))
        ));
        let mut reworded = renewed;
        reworded.reason = "abuse".to_string();
        assert_eq!(repo.update_entity(reworded).unwrap().reason, "abuse");

        let stored: Vec<BlockedIp> = repo.list_entities().unwrap();
        assert_eq!(stored.len(), 3);
    }

    #[test]
    fn update_of_missing_entity_is_not_found() {
        let repo = InMemoryRepository::new();
        let mut ghost = contact("Ghost");
        ghost.id = 99;

        assert!(matches!(repo.update_entity(ghost), Err(RepositoryError::NotFound)));
    }

    #[test]
    fn seed_sections_are_optional() {
        let seed: SeedData = serde_json::from_str(
            r#"{"blacklist": [{"id": 3, "ip_address": "10.0.0.1", "reason": "spam",
                "blocked_by": "admin", "created_at": "2024-01-01T00:00:00",
                "expires_at": "2024-01-05T00:00:00"}]}"#,
        )
        .unwrap();
        let repo = InMemoryRepository::from_seed(seed);

        let ip: IpAddr = "10.0.0.1".parse().unwrap();
        assert!(repo.is_ip_blocked(ip, ts(2)).unwrap());
        assert!(!repo.is_ip_blocked(ip, ts(6)).unwrap());
        assert!(!repo.is_ip_blocked("10.0.0.2".parse().unwrap(), ts(2)).unwrap());

        let next = repo
            .insert_entity(BlockedIp {
                id: 0,
                ip_address: "10.0.0.9".to_string(),
                reason: "abuse".to_string(),
                blocked_by: "admin".to_string(),
                created_at: ts(3),
                expires_at: None,
            })
            .unwrap();
        assert_eq!(next.id, 4);
        assert_eq!(repo.get_settings().unwrap(), AppSettings::default());
    }

    #[test]
    fn public_content_is_filtered_and_ordered() {
        let banner = |id: i32, position: i32, is_active: bool| Banner {
            id,
            title: format!("Banner {id}"),
            subtitle: None,
            image_url: "/img/banner.png".to_string(),
            link_url: None,
            position,
            is_active,
            starts_at: None,
            ends_at: None,
            created_at: ts(1),
        };
        let post = |id: i32, status: PostStatus, day: u32| Post {
            id,
            title: format!("Post {id}"),
            slug: format!("post-{id}"),
            excerpt: String::new(),
            content: String::new(),
            author: "editor".to_string(),
            category: "news".to_string(),
            status,
            image_url: None,
            created_at: ts(day),
            published_at: None,
        };
        let repo = InMemoryRepository::from_seed(SeedData {
            banners: vec![banner(1, 2, true), banner(2, 1, true), banner(3, 0, false)],
            posts: vec![
                post(1, PostStatus::Published, 1),
                post(2, PostStatus::Draft, 9),
                post(3, PostStatus::Published, 5),
            ],
            ..SeedData::default()
        });

        let banners = repo.list_active_banners(ts(2)).unwrap();
        assert_eq!(banners.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2, 1]);

        let posts = repo.list_published_posts().unwrap();
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 1]);
    }
}
